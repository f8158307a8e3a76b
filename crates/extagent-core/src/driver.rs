//! The top-level driver.
//!
//! This is the only code that decides the process exit status. Inner
//! components return typed errors; here they become a diagnostic on stderr
//! and a non-zero exit code. Invocations that arrive without a usable
//! protocol also get the usage banner on stdout.

use std::io::Write;
use std::process::ExitCode;

use tracing::error;

use extagent_contracts::{
    error::{ExtAgentError, ExtAgentResult},
    protocol::USAGE_BANNER,
};

use crate::env::Environment;
use crate::router::Agent;

/// Exit status for a normally completed invocation.
pub const EXIT_OK: u8 = 0;
/// Exit status for any fatal failure.
pub const EXIT_FATAL: u8 = 1;

/// Build an agent from the process environment, let `setup` register its
/// actions, and handle the one request.
pub fn run_agent<F>(name: &str, setup: F) -> ExitCode
where
    F: FnOnce(&mut Agent, &Environment) -> ExtAgentResult<()>,
{
    let env = Environment::from_env();
    let result = Agent::from_environment(name, &env).and_then(|mut agent| {
        setup(&mut agent, &env)?;
        agent.process_request(&env)
    });
    finish(result)
}

/// Turn the result of a dispatch into the process exit code, reporting
/// fatal errors on the way.
pub fn finish<T>(result: ExtAgentResult<T>) -> ExitCode {
    let status = report(&result, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(status)
}

/// Write diagnostics for `result` and return the exit status.
pub fn report<T>(result: &ExtAgentResult<T>, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    let Err(e) = result else {
        return EXIT_OK;
    };

    error!(error = %e, "invocation failed");

    // Diagnostics are best effort; there is nowhere left to report to.
    if matches!(
        e,
        ExtAgentError::InvalidProtocol { .. } | ExtAgentError::InvalidEnvironment
    ) {
        let _ = writeln!(out, "{USAGE_BANNER}");
        let _ = writeln!(out);
    }
    let _ = writeln!(err, "{e}");

    EXIT_FATAL
}

#[cfg(test)]
mod tests {
    use extagent_contracts::error::{ExtAgentError, ExtAgentResult};
    use extagent_contracts::protocol::USAGE_BANNER;

    use super::{report, EXIT_FATAL, EXIT_OK};

    fn run(result: ExtAgentResult<()>) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = report(&result, &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn success_is_silent_and_zero() {
        let (status, out, err) = run(Ok(()));
        assert_eq!(status, EXIT_OK);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn invalid_protocol_prints_banner_and_diagnostic() {
        let (status, out, err) = run(Err(ExtAgentError::InvalidProtocol {
            protocol: "bogus".to_string(),
        }));
        assert_eq!(status, EXIT_FATAL);
        assert_eq!(out, format!("{USAGE_BANNER}\n\n"));
        assert_eq!(err, "Invalid protocol 'bogus'\n");
    }

    #[test]
    fn other_fatal_errors_skip_the_banner() {
        let (status, out, err) = run(Err(ExtAgentError::ActivationFailed {
            reason: "no".to_string(),
        }));
        assert_eq!(status, EXIT_FATAL);
        assert!(out.is_empty());
        assert!(err.contains("activation handler failed"));
    }
}
