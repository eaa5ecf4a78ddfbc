//! JVMCI capability probe

use std::path::Path;

use tracing::{debug, error};

use crate::error::{GateError, Result};
use crate::process::{render_command, ProcessRunner};

/// Flag that makes a JVMCI-enabled launcher print its compiler properties
pub const JVMCI_PROBE_FLAG: &str = "-XX:+JVMCIPrintProperties";

/// Fails the run if the image launcher does not accept the JVMCI probe flag.
///
/// Only the exit status is inspected. On failure the full captured output is
/// logged before returning [`GateError::CapabilityMissing`].
pub fn probe_capability<R: ProcessRunner + ?Sized>(runner: &R, java: &Path) -> Result<()> {
    let result = runner.run(java, &[JVMCI_PROBE_FLAG])?;

    if !result.success() {
        error!(
            command = %render_command(java, &[JVMCI_PROBE_FLAG]),
            exit_code = ?result.exit_code,
            "capability probe failed:\n{}",
            result.output
        );
        return Err(GateError::CapabilityMissing {
            output: result.output,
        });
    }

    debug!("JVMCI capability present");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProbeResult;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct ScriptedRunner {
        result: ProbeResult,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, _program: &Path, args: &[&str]) -> Result<ProbeResult> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            Ok(self.result.clone())
        }
    }

    fn runner(exit_code: Option<i32>, output: &str) -> ScriptedRunner {
        ScriptedRunner {
            result: ProbeResult::new(exit_code, output),
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_zero_exit_passes() {
        let r = runner(Some(0), "[JVMCI properties]\n");
        probe_capability(&r, &PathBuf::from("java")).unwrap();
        assert_eq!(*r.calls.borrow(), vec![vec![JVMCI_PROBE_FLAG.to_string()]]);
    }

    #[test]
    fn test_nonzero_exit_is_capability_missing() {
        let r = runner(Some(1), "Unrecognized VM option 'JVMCIPrintProperties'");
        let err = probe_capability(&r, &PathBuf::from("java")).unwrap_err();
        match err {
            GateError::CapabilityMissing { output } => {
                assert!(output.contains("Unrecognized VM option"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_signal_termination_is_capability_missing() {
        let r = runner(None, "");
        let err = probe_capability(&r, &PathBuf::from("java")).unwrap_err();
        assert!(matches!(err, GateError::CapabilityMissing { .. }));
        assert!(err.to_string().contains("JVMCI-enabled JDK"));
    }
}
