use serde::{Deserialize, Serialize};

/// Options for selector synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Re-resolve every synthesized chain and reject it unless it yields exactly the target
    pub verify: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { verify: true }
    }
}

impl SynthesisOptions {
    /// Create new synthesis options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verification
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Options for the interactive probe workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Deepest heading level collected as a candidate (1 for `h1` only, up to 6)
    pub max_heading_level: u8,

    /// Compare content excerpts case-insensitively
    pub case_insensitive: bool,

    /// Options forwarded to selector synthesis
    pub synthesis: SynthesisOptions,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            case_insensitive: true,
            synthesis: SynthesisOptions::default(),
        }
    }
}

impl ProbeOptions {
    /// Create new probe options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest heading level, clamped to 1..=6
    pub fn max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set case-insensitive excerpt matching
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Set synthesis options
    pub fn synthesis(mut self, synthesis: SynthesisOptions) -> Self {
        self.synthesis = synthesis;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ProbeOptions::default();
        assert_eq!(opts.max_heading_level, 6);
        assert!(opts.case_insensitive);
        assert!(opts.synthesis.verify);
    }

    #[test]
    fn test_probe_options_builder() {
        let opts = ProbeOptions::new()
            .max_heading_level(9)
            .case_insensitive(false)
            .synthesis(SynthesisOptions::new().verify(false));

        assert_eq!(opts.max_heading_level, 6);
        assert!(!opts.case_insensitive);
        assert!(!opts.synthesis.verify);
        assert_eq!(ProbeOptions::new().max_heading_level(0).max_heading_level, 1);
    }
}
