//! Shared fixtures for gate integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;

use vmgate::process::{ProbeResult, ProcessRunner};
use vmgate::verify::{JVMCI_PROBE_FLAG, VERSION_FLAG};

pub const OPEN_BANNER: &str = "openjdk version \"17.0.1\"\n\
    OpenJDK Runtime Environment (build 17.0.1+12)\n\
    GraalVM 22.3.0 (build 17.0.1+12, mixed mode)";

pub const ORACLE_BANNER: &str = "java version \"17.0.1\"\n\
    Java(TM) SE Runtime Environment (build 17.0.1+12)\n\
    GraalVM 22.3.0 (build 17.0.1+12, mixed mode)";

/// Runner that answers each flag with a canned result and records every call
pub struct FakeImage {
    pub probe: ProbeResult,
    pub version: ProbeResult,
    pub calls: RefCell<Vec<String>>,
}

impl FakeImage {
    pub fn new(probe_exit: i32, banner: &str) -> Self {
        Self {
            probe: ProbeResult::new(Some(probe_exit), "JVMCI properties\n"),
            version: ProbeResult::new(Some(0), format!("{banner}\n")),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for FakeImage {
    fn run(&self, _program: &Path, args: &[&str]) -> vmgate::Result<ProbeResult> {
        let flag = args.first().copied().unwrap_or_default();
        self.calls.borrow_mut().push(flag.to_string());
        match flag {
            JVMCI_PROBE_FLAG => Ok(self.probe.clone()),
            VERSION_FLAG => Ok(self.version.clone()),
            other => panic!("unexpected launch flag: {other}"),
        }
    }
}

/// Write a shell-script launcher at `<home>/bin/java`.
///
/// The script logs each invocation's first argument to `<home>/calls.log`,
/// exits `probe_exit` for the JVMCI probe, and prints `banner` on stderr for
/// `-version`.
#[cfg(unix)]
pub fn write_fake_launcher(home: &Path, probe_exit: i32, banner: &str) {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let log = home.join("calls.log");
    let banner_file = home.join("banner.txt");
    fs::write(&banner_file, format!("{banner}\n")).unwrap();

    let script = format!(
        "#!/bin/sh\n\
         echo \"$1\" >> '{log}'\n\
         case \"$1\" in\n\
         {probe})\n  echo '[JVMCI properties]'\n  exit {probe_exit}\n  ;;\n\
         -version)\n  cat '{banner}' >&2\n  exit 0\n  ;;\n\
         esac\n\
         exit 2\n",
        log = log.display(),
        probe = JVMCI_PROBE_FLAG,
        banner = banner_file.display(),
    );
    let java = bin.join("java");
    fs::write(&java, script).unwrap();
    fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
pub fn read_calls(home: &Path) -> Vec<String> {
    std::fs::read_to_string(home.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
