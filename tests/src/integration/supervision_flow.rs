//! # Supervision Flow
//!
//! A promotion seen through a real filesystem watch restarts the service,
//! and only the service, in the in-memory process table.

use super::fixtures::*;
use sa_03_proposal_quorum::{ControlSurface, StateLayout};
use sa_04_process_supervisor::{
    watch_roots, ChangeStream, InMemoryProcessTable, ProcessDescriptor, RecordingLauncher,
    RoleMatcher, Runtime, Supervisor, Watchdog,
};
use shared_types::Role;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const OWN_PID: u32 = 1;

fn table_for(program: &Path) -> Vec<ProcessDescriptor> {
    let program = program.to_str().unwrap();
    vec![
        ProcessDescriptor::new(100, "self-amend", &[program, "--service"]),
        ProcessDescriptor::new(101, "self-amend", &[program, "--watchdog"]),
        // Same runtime, wrong argument count.
        ProcessDescriptor::new(102, "self-amend", &[program, "--service", "--verbose"]),
        // Wrong runtime, right flag.
        ProcessDescriptor::new(103, "python3", &["python3", "server.py", "--service"]),
        // Right runtime, flag without the tag.
        ProcessDescriptor::new(104, "self-amend", &[program, "--serve"]),
    ]
}

fn supervisor(
    table: Arc<InMemoryProcessTable>,
    runtime: &Runtime,
) -> Supervisor<Arc<InMemoryProcessTable>, RecordingLauncher> {
    Supervisor::new(
        table.clone(),
        RecordingLauncher::attached_to(table, runtime.clone()),
        RoleMatcher::with_own_pid(runtime, OWN_PID),
    )
}

#[test]
fn test_role_isolation() {
    let (_dir, layout) = state_dir();
    let runtime = Runtime::new(layout.program(), None);
    let table = Arc::new(InMemoryProcessTable::new(table_for(layout.program())));
    let sup = supervisor(table.clone(), &runtime);

    sup.refresh(Role::Service).unwrap();
    assert_eq!(table.terminated(), vec![100]);

    sup.refresh(Role::Watchdog).unwrap();
    assert_eq!(table.terminated(), vec![100, 101]);

    let survivors: Vec<u32> = table.running().iter().map(|p| p.pid).collect();
    for pid in [102, 103, 104] {
        assert!(survivors.contains(&pid), "{} was touched", pid);
    }
}

async fn wait_for_launch(table: &InMemoryProcessTable, count: usize) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while table.terminated().len() < count {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("service was not restarted");
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_promotion_restarts_service() {
    let (dir, layout) = state_dir();
    let (roots, program) = watch_roots(layout.state_dir(), layout.program()).unwrap();
    let layout = StateLayout::new(dir.path(), program.clone());

    let runtime = Runtime::new(&program, None);
    let table = Arc::new(InMemoryProcessTable::new(table_for(&program)));
    let watchdog = Arc::new(Watchdog::new(supervisor(table.clone(), &runtime), &program));

    let changes = ChangeStream::watch(&roots).unwrap();
    let (stop, stopped) = watch::channel(false);
    let task = tokio::spawn({
        let watchdog = watchdog.clone();
        async move { watchdog.run(changes, stopped).await }
    });

    // Proposal and signature writes alone restart nothing.
    let svc = open_service(players(&[("Ted", "K1"), ("Ann", "K2")]), layout);
    svc.submit(&signed("K1", b"v2")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(table.terminated().is_empty());

    svc.sign(&signed("K2", b"v2")).await.unwrap();
    wait_for_launch(&table, 1).await;

    assert_eq!(table.terminated(), vec![100]);
    assert_eq!(watchdog.supervisor().launcher().launches(), vec![Role::Service]);

    stop.send(true).unwrap();
    task.await.unwrap().unwrap();
}
