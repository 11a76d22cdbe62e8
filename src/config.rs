use std::env;
use std::time::Duration;

use crate::domain::interpret::InexactPolicy;
use crate::domain::solver::SolverOptions;
use crate::domain::solver_factory::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB
const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Server settings, read from the environment (and `.env` via `dotenv`)
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub json_limit: usize,
    pub solver: SolverType,
    pub cache_capacity: usize,
    pub solve_timeout: Option<Duration>,
    pub presolve: bool,
    pub inexact_policy: InexactPolicy,
    pub sentry_dsn: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            solver: SolverType::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            solve_timeout: None,
            presolve: true,
            inexact_policy: InexactPolicy::default(),
            sentry_dsn: None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let port = lookup("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let json_limit = lookup("JSON_PAYLOAD_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.json_limit);

        let solver = match lookup("SOLVER") {
            Some(name) => SolverType::from_str(&name).unwrap_or_else(|| {
                log::warn!(
                    "unknown SOLVER {:?}, falling back to {}",
                    name,
                    defaults.solver.name()
                );
                defaults.solver
            }),
            None => defaults.solver,
        };

        let cache_capacity = lookup("CACHE_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.cache_capacity);

        let solve_timeout = lookup("SOLVE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

        let presolve = lookup("SOLVER_PRESOLVE")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.presolve);

        let inexact_policy = match lookup("ACCEPT_INEXACT").and_then(|v| parse_bool(&v)) {
            Some(false) => InexactPolicy::Reject,
            Some(true) => InexactPolicy::Accept,
            None => defaults.inexact_policy,
        };

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        ServerConfig {
            port,
            json_limit,
            solver,
            cache_capacity,
            solve_timeout,
            presolve,
            inexact_policy,
            sentry_dsn,
        }
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            time_limit: self.solve_timeout,
            presolve: self.presolve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_given_nothing_should_use_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_all_settings() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("JSON_PAYLOAD_LIMIT", "1024"),
            ("SOLVER", "MICROLP"),
            ("CACHE_CAPACITY", "0"),
            ("SOLVE_TIMEOUT_SECS", "2.5"),
            ("SOLVER_PRESOLVE", "off"),
            ("ACCEPT_INEXACT", "false"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ]);

        assert_eq!(config.port, 9100);
        assert_eq!(config.json_limit, 1024);
        assert_eq!(config.solver, SolverType::Microlp);
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.solve_timeout, Some(Duration::from_millis(2500)));
        assert!(!config.presolve);
        assert_eq!(config.inexact_policy, InexactPolicy::Reject);
        assert!(config.sentry_dsn.is_some());
        assert_eq!(
            config.solver_options(),
            SolverOptions {
                time_limit: Some(Duration::from_millis(2500)),
                presolve: false,
            }
        );
    }

    #[test]
    fn test_from_lookup_given_garbage_should_keep_defaults() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("SOLVER", "simplex9000"),
            ("SOLVE_TIMEOUT_SECS", "-3"),
            ("ACCEPT_INEXACT", "maybe"),
            ("SENTRY_DSN", "  "),
        ]);
        assert_eq!(config, ServerConfig::default());
    }
}
