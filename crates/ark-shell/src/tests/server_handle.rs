use crate::tests::fakes::FakeSpawner;
use crate::{LaunchSpec, ServerHandle, ServerSettings, ServerState, ShellError};

use std::path::Path;
use std::sync::atomic::Ordering;

fn spec() -> LaunchSpec {
    LaunchSpec::standalone(
        Path::new("/app/.next/standalone/server.js"),
        &ServerSettings::default(),
    )
}

#[test]
fn given_new_handle_when_inspected_then_uninitialized() {
    let mut handle = ServerHandle::new();

    assert_eq!(handle.state(), ServerState::Uninitialized);
    assert_eq!(handle.pid(), None);
    assert!(!handle.is_live());
}

#[test]
fn given_new_handle_when_terminate_then_noop() {
    let mut handle = ServerHandle::new();

    let stopped = handle.terminate().unwrap();

    assert!(!stopped);
    assert_eq!(handle.state(), ServerState::Uninitialized);
}

#[test]
fn given_started_handle_when_inspected_then_running_with_pid() {
    let spawner = FakeSpawner::new();
    let mut handle = ServerHandle::new();

    let pid = handle.start(spawner.as_ref(), &spec()).unwrap();

    assert_eq!(pid, 4242);
    assert_eq!(handle.state(), ServerState::Running { pid: 4242 });
    assert_eq!(handle.pid(), Some(4242));
    assert!(handle.is_live());
}

#[test]
fn given_live_handle_when_start_again_then_already_running() {
    let spawner = FakeSpawner::new();
    let mut handle = ServerHandle::new();
    handle.start(spawner.as_ref(), &spec()).unwrap();

    let result = handle.start(spawner.as_ref(), &spec());

    assert!(matches!(
        result,
        Err(ShellError::ServerAlreadyRunning { pid: 4242, .. })
    ));
    assert_eq!(spawner.launches().len(), 1);
}

#[test]
fn given_live_handle_when_terminate_twice_then_signalled_once() {
    // Given
    let spawner = FakeSpawner::new();
    let mut handle = ServerHandle::new();
    handle.start(spawner.as_ref(), &spec()).unwrap();

    // When
    let first = handle.terminate().unwrap();
    let second = handle.terminate().unwrap();

    // Then
    assert!(first);
    assert!(!second);
    assert_eq!(handle.state(), ServerState::Terminated);
    assert_eq!(handle.pid(), None);
    assert_eq!(spawner.process(0).terminations.load(Ordering::SeqCst), 1);
}

#[test]
fn given_exited_process_when_terminate_then_cleared_without_signal() {
    let spawner = FakeSpawner::new();
    let mut handle = ServerHandle::new();
    handle.start(spawner.as_ref(), &spec()).unwrap();
    spawner.process(0).exited.store(true, Ordering::SeqCst);

    let stopped = handle.terminate().unwrap();

    assert!(stopped);
    assert_eq!(handle.pid(), None);
    assert_eq!(spawner.process(0).terminations.load(Ordering::SeqCst), 0);
}

#[test]
fn given_terminated_handle_when_start_then_running_again() {
    let spawner = FakeSpawner::new();
    let mut handle = ServerHandle::new();
    handle.start(spawner.as_ref(), &spec()).unwrap();
    handle.terminate().unwrap();

    let pid = handle.start(spawner.as_ref(), &spec()).unwrap();

    assert_eq!(pid, 4243);
    assert_eq!(handle.state(), ServerState::Running { pid: 4243 });
}

#[test]
fn given_failing_spawner_when_start_then_error_and_still_uninitialized() {
    let spawner = FakeSpawner::failing();
    let mut handle = ServerHandle::new();

    let result = handle.start(spawner.as_ref(), &spec());

    assert!(matches!(result, Err(ShellError::ProcessSpawn { .. })));
    assert_eq!(handle.state(), ServerState::Uninitialized);
}

// =========================================================================
// Real child process (Unix)
// =========================================================================

#[cfg(unix)]
mod child_process {
    use crate::{LaunchSpec, NodeSpawner, ServerHandle, ServerState};

    use std::fs;
    use std::path::Path;
    use std::time::{Duration, Instant};

    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    use tempfile::TempDir;

    fn shell_spec(dir: &Path, script: &str) -> LaunchSpec {
        LaunchSpec {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            working_dir: dir.to_path_buf(),
            envs: vec![("NODE_ENV".into(), "production".into())],
        }
    }

    /// Poll until `check` holds or five seconds pass.
    fn wait_until(mut check: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if check() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        check()
    }

    /// True once the pid no longer exists, i.e. it exited and was reaped.
    fn is_gone(pid: u32) -> bool {
        kill(Pid::from_raw(pid as i32), None) == Err(Errno::ESRCH)
    }

    #[test]
    fn given_node_spawner_when_start_then_child_runs_in_working_dir_with_env() {
        // Given
        let temp = TempDir::new().unwrap();
        let spec = shell_spec(
            temp.path(),
            "pwd > launch.txt; echo \"$NODE_ENV\" >> launch.txt; exec sleep 30",
        );
        let mut handle = ServerHandle::new();

        // When
        let pid = handle.start(&NodeSpawner, &spec).unwrap();

        // Then
        let launch_file = temp.path().join("launch.txt");
        assert!(wait_until(|| {
            fs::read_to_string(&launch_file)
                .map(|s| s.lines().count() == 2)
                .unwrap_or(false)
        }));
        let content = fs::read_to_string(&launch_file).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            fs::canonicalize(lines.next().unwrap()).unwrap(),
            fs::canonicalize(temp.path()).unwrap()
        );
        assert_eq!(lines.next(), Some("production"));
        assert_eq!(handle.state(), ServerState::Running { pid });
        assert!(handle.is_live());

        handle.terminate().unwrap();
    }

    #[test]
    fn given_live_child_when_terminate_then_exits_and_is_reaped() {
        // Given
        let temp = TempDir::new().unwrap();
        let mut handle = ServerHandle::new();
        let pid = handle
            .start(&NodeSpawner, &shell_spec(temp.path(), "exec sleep 30"))
            .unwrap();
        assert!(handle.is_live());

        // When
        let stopped = handle.terminate().unwrap();

        // Then
        assert!(stopped);
        assert_eq!(handle.state(), ServerState::Terminated);
        assert!(wait_until(|| is_gone(pid)));
        assert!(!handle.terminate().unwrap());
    }

    #[test]
    fn given_missing_program_when_start_then_process_spawn_error() {
        let temp = TempDir::new().unwrap();
        let spec = LaunchSpec {
            program: "ark-shell-no-such-node".into(),
            ..shell_spec(temp.path(), "")
        };
        let mut handle = ServerHandle::new();

        let result = handle.start(&NodeSpawner, &spec);

        assert!(matches!(
            result,
            Err(crate::ShellError::ProcessSpawn { .. })
        ));
        assert_eq!(handle.state(), ServerState::Uninitialized);
    }
}
