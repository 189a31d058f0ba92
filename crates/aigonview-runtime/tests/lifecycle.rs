//! End-to-end tests for launch / status / kill against a stand-in viewer.
//!
//! The stand-in viewers are `sh` one-liners that never bind their port, so a
//! second launch on the same port reaches the record check instead of being
//! moved to the next port by the allocator.

#![cfg(unix)]

mod common;

use std::fs;
use std::net::TcpListener;
use std::time::Duration;

use aigonview_core::{LifecycleError, record_path};
use aigonview_runtime::{
    KillOutcome, KillTarget, LifecycleController, LiveInstance, Termination, is_running,
};

use common::{
    Sandbox, crashing_viewer, dead_pid, finishing_viewer, free_port, idle_viewer, request,
    stubborn_viewer, wait_until_gone,
};

#[tokio::test]
async fn launch_then_status_reports_the_instance() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();

    let outcome = controller.launch(&request(port)).await.expect("launch failed");
    let pid = outcome.pid.expect("background launch has a PID");

    assert_eq!(outcome.port, port);
    assert_eq!(sandbox.recorded_ports(), vec![port]);

    let report = controller.status().expect("status failed");
    assert_eq!(report.live, vec![LiveInstance { pid, port }]);
    assert_eq!(report.stale_removed, 0);

    controller.kill(KillTarget::All).await.expect("cleanup kill failed");
}

#[tokio::test]
async fn second_launch_on_same_port_is_rejected() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();

    let first = controller.launch(&request(port)).await.expect("first launch failed");
    let err = controller.launch(&request(port)).await.unwrap_err();

    match err {
        LifecycleError::AlreadyRunning { port: p, pid } => {
            assert_eq!(p, port);
            assert_eq!(Some(pid), first.pid);
        }
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }
    assert_eq!(sandbox.recorded_ports(), vec![port]);

    controller.kill(KillTarget::All).await.expect("cleanup kill failed");
}

#[tokio::test]
async fn kill_after_launch_clears_everything() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();

    let outcome = controller.launch(&request(port)).await.expect("launch failed");
    let record = outcome.record_path.clone().expect("record path");
    assert!(record.exists());

    let killed = controller.kill(KillTarget::Port(port)).await.expect("kill failed");

    assert_eq!(killed.killed(), 1);
    assert!(!record.exists());
    assert!(controller.status().expect("status failed").is_empty());
}

#[tokio::test]
async fn status_removes_record_of_dead_process() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let pid_dir = ctx.instance_dir().path;
    let record = record_path(&pid_dir, 4444);
    let pid = dead_pid();
    assert!(!is_running(pid));
    fs::write(&record, pid.to_string()).unwrap();

    let report = controller.status().expect("status failed");

    assert!(report.is_empty());
    assert_eq!(report.stale_removed, 1);
    assert!(!record.exists());
}

#[tokio::test]
async fn status_removes_malformed_record_and_keeps_foreign_files() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let pid_dir = ctx.instance_dir().path;
    let record = record_path(&pid_dir, 4444);
    fs::write(&record, "garbage").unwrap();
    let foreign = pid_dir.join("notes.txt");
    fs::write(&foreign, "keep me").unwrap();

    let report = controller.status().expect("status failed");

    assert_eq!(report.stale_removed, 1);
    assert!(!record.exists());
    assert!(foreign.exists());
}

#[tokio::test]
async fn kill_unknown_port_reports_no_record() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);

    let outcome = controller.kill(KillTarget::Port(4444)).await.expect("kill failed");
    assert_eq!(outcome, KillOutcome::NoRecordForPort(4444));
    assert_eq!(outcome.killed(), 0);

    let outcome = controller.kill(KillTarget::All).await.expect("kill failed");
    assert_eq!(outcome, KillOutcome::NoViewers);
    assert_eq!(outcome.killed(), 0);
}

#[tokio::test]
async fn kill_counts_already_gone_and_drops_bad_records() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let pid_dir = ctx.instance_dir().path;
    let dead = dead_pid();
    fs::write(record_path(&pid_dir, 5001), dead.to_string()).unwrap();
    fs::write(record_path(&pid_dir, 5002), "not a pid").unwrap();

    let outcome = controller.kill(KillTarget::All).await.expect("kill failed");

    let KillOutcome::Processed(summary) = outcome else {
        panic!("expected Processed, got {outcome:?}");
    };
    assert_eq!(summary.killed(), 1);
    assert_eq!(summary.stopped[0].pid, dead);
    assert_eq!(summary.stopped[0].termination, Termination::AlreadyGone);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].port, 5002);
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn occupied_port_moves_launch_to_next_free_port() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let blocker = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = blocker.local_addr().unwrap().port();

    let Ok(plan) = controller.prepare_launch(&request(taken)) else {
        // Every port in the window was busy on this host; nothing to check.
        return;
    };
    assert!(plan.port_changed());
    assert!(plan.port > taken);

    let outcome = controller.start(&plan, &request(taken)).await.expect("start failed");

    assert_eq!(outcome.port, plan.port);
    assert_eq!(sandbox.recorded_ports(), vec![plan.port]);
    assert!(
        outcome
            .record_path
            .as_ref()
            .is_some_and(|p| p.ends_with(format!("fileserver.{}.pid", plan.port)))
    );

    controller.kill(KillTarget::All).await.expect("cleanup kill failed");
}

#[tokio::test]
async fn exhausted_port_window_spawns_nothing() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer()).with_port_attempts(1);
    let controller = LifecycleController::new(&ctx);
    let blocker = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = blocker.local_addr().unwrap().port();

    let err = controller.launch(&request(taken)).await.unwrap_err();

    assert!(matches!(
        err,
        LifecycleError::NoPortAvailable { start, end } if start == taken && end == taken
    ));
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn launch_replaces_stale_record() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();
    let dead = dead_pid();
    let record = record_path(&ctx.instance_dir().path, port);
    fs::write(&record, dead.to_string()).unwrap();

    let plan = controller.prepare_launch(&request(port)).expect("prepare failed");
    assert_eq!(plan.cleared_stale, Some(dead));
    assert!(!record.exists());

    let outcome = controller.start(&plan, &request(port)).await.expect("start failed");
    assert_ne!(outcome.pid, Some(dead));
    assert_eq!(fs::read_to_string(&record).unwrap(), outcome.pid.unwrap().to_string());

    controller.kill(KillTarget::All).await.expect("cleanup kill failed");
}

#[tokio::test]
async fn crashing_viewer_is_reported_and_rolled_back() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(crashing_viewer());
    let controller = LifecycleController::new(&ctx);

    let err = controller.launch(&request(free_port())).await.unwrap_err();

    assert!(matches!(err, LifecycleError::SpawnFailed { .. }), "{err:?}");
    assert!(err.diagnostics().is_some_and(|s| s.contains("boom")));
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn missing_viewer_program_is_a_spawn_failure() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(aigonview_core::ViewerCommand::new(
        "/nonexistent/aigonviewer-test-viewer",
    ));
    let controller = LifecycleController::new(&ctx);

    let err = controller.launch(&request(free_port())).await.unwrap_err();

    assert!(matches!(err, LifecycleError::SpawnFailed { .. }), "{err:?}");
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn foreground_run_writes_no_record() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(finishing_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();
    let mut req = request(port);
    req.foreground = true;

    let outcome = controller.launch(&req).await.expect("foreground launch failed");

    assert_eq!(outcome.port, port);
    assert_eq!(outcome.pid, None);
    assert!(!outcome.interrupted);
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn foreground_failure_reports_exit_status() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(crashing_viewer());
    let controller = LifecycleController::new(&ctx);
    let mut req = request(free_port());
    req.foreground = true;

    let err = controller.launch(&req).await.unwrap_err();

    // stderr went to the terminal, nothing was captured
    match &err {
        LifecycleError::SpawnFailed { reason, stderr } => {
            assert!(reason.contains("exited"), "{reason}");
            assert!(stderr.is_empty());
        }
        other => panic!("expected SpawnFailed, got {other:?}"),
    }
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn launch_into_missing_directory_fails_cleanly() {
    let sandbox = Sandbox::new();
    let ctx = aigonview_core::ViewerContext::new(sandbox.serve_dir.join("missing"))
        .with_pid_dir(Some(sandbox.pid_dir.clone()))
        .with_viewer(idle_viewer())
        .with_grace(common::FAST);
    let controller = LifecycleController::new(&ctx);

    let err = controller.launch(&request(free_port())).await.unwrap_err();

    assert!(matches!(err, LifecycleError::Path(_)), "{err:?}");
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn kill_escalates_to_sigkill_when_sigterm_is_ignored() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(stubborn_viewer());
    let controller = LifecycleController::new(&ctx);
    let port = free_port();

    let outcome = controller.launch(&request(port)).await.expect("launch failed");
    let pid = outcome.pid.expect("background launch has a PID");

    let killed = controller.kill(KillTarget::Port(port)).await.expect("kill failed");

    let KillOutcome::Processed(summary) = killed else {
        panic!("expected Processed, got {killed:?}");
    };
    assert_eq!(summary.killed(), 1);
    assert_eq!(summary.stopped[0].pid, pid);
    assert_eq!(summary.stopped[0].termination, Termination::Forced);
    assert!(wait_until_gone(pid, Duration::from_secs(2)).await);
    assert!(sandbox.recorded_ports().is_empty());
}

#[tokio::test]
async fn signal_failure_is_counted_and_batch_continues() {
    let sandbox = Sandbox::new();
    let ctx = sandbox.context(idle_viewer());
    let controller = LifecycleController::new(&ctx);
    let pid_dir = ctx.instance_dir().path;
    // Valid record content, but no process can have this PID
    let unsignalable = u32::MAX;
    fs::write(record_path(&pid_dir, 5001), unsignalable.to_string()).unwrap();
    let dead = dead_pid();
    fs::write(record_path(&pid_dir, 5002), dead.to_string()).unwrap();

    let outcome = controller.kill(KillTarget::All).await.expect("kill failed");

    let KillOutcome::Processed(summary) = outcome else {
        panic!("expected Processed, got {outcome:?}");
    };
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].port, 5001);
    assert_eq!(summary.failures[0].pid, Some(unsignalable));
    assert_eq!(summary.killed(), 1);
    assert_eq!(summary.stopped[0].port, 5002);
    assert!(sandbox.recorded_ports().is_empty());
}
