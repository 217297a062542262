//! Build environment assembly
//!
//! The downstream Vite config reads these variables to decide how aggressive
//! to be about memory: the heap ceiling goes through NODE_OPTIONS, the rest
//! are feature flags the app's vite.config consumes.

/// Default Node.js heap ceiling in megabytes.
pub const DEFAULT_MEMORY_LIMIT_MB: u32 = 4096;

/// Memory-optimization flag read by the app's Vite config.
pub const ENV_OPTIMIZE_MEMORY: &str = "VITE_OPTIMIZE_MEMORY";
/// Source-map suppression flag.
pub const ENV_DISABLE_SOURCEMAPS: &str = "VITE_DISABLE_SOURCEMAPS";
/// Bundle-reduction flag (vendor chunking + aggressive tree-shaking).
pub const ENV_REDUCE_BUNDLE: &str = "VITE_REDUCE_BUNDLE";
/// Split-build flag, set only when client and server are built separately.
pub const ENV_SPLIT_BUILD: &str = "VITE_SPLIT_BUILD";

/// Environment variables injected into build subprocesses.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    pub memory_limit_mb: u32,
    pub sourcemaps: bool,
    pub split: bool,
}

impl BuildEnv {
    pub fn new(memory_limit_mb: u32) -> Self {
        Self {
            memory_limit_mb,
            sourcemaps: false,
            split: false,
        }
    }

    pub fn with_sourcemaps(mut self, sourcemaps: bool) -> Self {
        self.sourcemaps = sourcemaps;
        self
    }

    pub fn with_split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Key/value pairs to inject into the subprocess environment.
    pub fn vars(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            (
                "NODE_OPTIONS".to_string(),
                format!("--max-old-space-size={}", self.memory_limit_mb),
            ),
            (ENV_OPTIMIZE_MEMORY.to_string(), "1".to_string()),
            (ENV_REDUCE_BUNDLE.to_string(), "1".to_string()),
        ];
        if !self.sourcemaps {
            vars.push((ENV_DISABLE_SOURCEMAPS.to_string(), "1".to_string()));
        }
        if self.split {
            vars.push((ENV_SPLIT_BUILD.to_string(), "1".to_string()));
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(String, String)], key: &str) -> Option<&'a str> {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_env_sets_heap_ceiling() {
        let env = BuildEnv::new(DEFAULT_MEMORY_LIMIT_MB);
        let vars = env.vars();
        assert_eq!(
            lookup(&vars, "NODE_OPTIONS"),
            Some("--max-old-space-size=4096")
        );
        assert_eq!(lookup(&vars, ENV_OPTIMIZE_MEMORY), Some("1"));
        assert_eq!(lookup(&vars, ENV_REDUCE_BUNDLE), Some("1"));
    }

    #[test]
    fn test_sourcemaps_suppressed_by_default() {
        let vars = BuildEnv::new(2048).vars();
        assert_eq!(lookup(&vars, ENV_DISABLE_SOURCEMAPS), Some("1"));
    }

    #[test]
    fn test_sourcemaps_opt_in_drops_suppression_flag() {
        let vars = BuildEnv::new(2048).with_sourcemaps(true).vars();
        assert_eq!(lookup(&vars, ENV_DISABLE_SOURCEMAPS), None);
    }

    #[test]
    fn test_split_flag_only_when_splitting() {
        let vars = BuildEnv::new(2048).vars();
        assert_eq!(lookup(&vars, ENV_SPLIT_BUILD), None);

        let vars = BuildEnv::new(2048).with_split(true).vars();
        assert_eq!(lookup(&vars, ENV_SPLIT_BUILD), Some("1"));
    }

    #[test]
    fn test_custom_memory_ceiling() {
        let vars = BuildEnv::new(6144).vars();
        assert_eq!(
            lookup(&vars, "NODE_OPTIONS"),
            Some("--max-old-space-size=6144")
        );
    }
}
