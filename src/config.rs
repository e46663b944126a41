/// Fixed listening port of the HTTP responder.
pub const DEFAULT_PORT: u16 = 3000;

pub const NETSTAT_ENV: &str = "NETSNAP_NETSTAT";
pub const SS_ENV: &str = "NETSNAP_SS";
pub const DEBUG_ENV: &str = "NETSNAP_DEBUG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub netstat_bin: String,
    pub ss_bin: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            netstat_bin: "netstat".into(),
            ss_bin: "ss".into(),
            debug: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            netstat_bin: lookup(NETSTAT_ENV).unwrap_or(defaults.netstat_bin),
            ss_bin: lookup(SS_ENV).unwrap_or(defaults.ss_bin),
            debug: lookup(DEBUG_ENV).is_some(),
        }
    }

    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.default_log_filter(), "info");
    }

    #[test]
    fn overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (NETSTAT_ENV, "/usr/sbin/netstat"),
            (DEBUG_ENV, "1"),
        ]
        .into_iter()
        .collect();
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.netstat_bin, "/usr/sbin/netstat");
        assert_eq!(cfg.ss_bin, "ss");
        assert!(cfg.debug);
        assert_eq!(cfg.default_log_filter(), "debug");
    }
}
