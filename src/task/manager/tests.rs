// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use super::TaskManager;
use crate::config::Config;
use crate::error::{ChoreError, ConfigError, GuardError, ProcessError, TaskError};
use crate::output::{Console, Palette};
use crate::platform::Platform;
use crate::platform::capabilities::HostCapabilities;
use crate::task::registry::TaskRegistry;
use crate::task::{InvocationContext, TaskAction, TaskSpec};

fn context(config: Config, root: &Path) -> InvocationContext {
    let host = HostCapabilities::resolve(Platform::Linux).unwrap();
    InvocationContext::new(Arc::new(config), host, root)
        .with_console(Console::new(Palette::PLAIN))
}

fn shell(name: &str, commands: &[&str]) -> TaskSpec {
    let action = TaskAction::shell(commands.iter().copied());
    TaskSpec::new(name, "TEST", "", action)
}

fn aggregate(name: &str, members: &[&str]) -> TaskSpec {
    let action = TaskAction::aggregate(members.iter().copied());
    TaskSpec::new(name, "TEST", "", action)
}

fn manager(registry: TaskRegistry, ctx: InvocationContext, tasks: &[&str]) -> TaskManager {
    let mut manager = TaskManager::new(Arc::new(registry), ctx);
    manager.add_all(tasks.iter().copied());
    manager
}

fn log_of(root: &Path) -> String {
    std::fs::read_to_string(root.join("log.txt")).unwrap_or_default()
}

fn chore_error(err: &anyhow::Error) -> &ChoreError {
    err.downcast_ref::<ChoreError>().unwrap()
}

#[test]
fn test_task_manager_new() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(Config::default(), dir.path());
    let manager = manager(TaskRegistry::default(), ctx, &[]);

    assert_eq!(manager.task_count(), 0);
    assert!(!manager.is_cancelled());
    manager.interrupt_all();
    assert!(manager.is_cancelled());
}

#[tokio::test]
async fn test_run_all_empty_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(Config::default(), dir.path());
    let manager = manager(TaskRegistry::default(), ctx, &[]);
    assert!(manager.run_all().await.is_ok());
}

#[cfg(unix)]
#[tokio::test]
async fn test_tasks_run_in_order_and_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell("a", &["echo a >> log.txt"]));
    registry.register(shell("b", &["echo b >> log.txt"]));
    registry.register(aggregate("both", &["a", "b"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["a", "both", "b"]);
    manager.run_all().await.unwrap();

    assert_eq!(log_of(dir.path()), "a\nb\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_aggregate_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell("first", &["echo first >> log.txt"]));
    registry.register(shell("broken", &["exit 3"]));
    registry.register(shell("after", &["echo after >> log.txt"]));
    registry.register(aggregate("audit", &["first", "broken", "after"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["audit", "after"]);
    let err = manager.run_all().await.unwrap_err();

    assert!(matches!(
        chore_error(&err),
        ChoreError::Process(inner) if matches!(**inner, ProcessError::NonZeroExit { code: 3, .. })
    ));
    assert_eq!(log_of(dir.path()), "first\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_commands_stop_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell(
        "steps",
        &["echo one >> log.txt", "false", "echo two >> log.txt"],
    ));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["steps"]);
    assert!(manager.run_all().await.is_err());
    assert_eq!(log_of(dir.path()), "one\n");
}

#[tokio::test]
async fn test_cycle_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(aggregate("x", &["y"]));
    registry.register(aggregate("y", &["x"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["x"]);
    let err = manager.run_all().await.unwrap_err();

    insta::assert_snapshot!(err, @"task error: task 'x' depends on itself via x -> y -> x");
}

#[tokio::test]
async fn test_unknown_member() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(aggregate("all", &["missing"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["all"]);
    let err = manager.run_all().await.unwrap_err();

    assert!(matches!(
        chore_error(&err),
        ChoreError::Task(inner)
            if matches!(&**inner, TaskError::NotFound(name) if name == "missing")
    ));
}

#[tokio::test]
async fn test_dry_run_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell("touch", &["echo ran >> log.txt"]));
    registry.register(TaskSpec::new("mkdirs", "BUILD", "", TaskAction::MakeDirs));

    let mut config = Config::default();
    config.global.dry = true;
    let ctx = context(config, dir.path());
    let manager = manager(registry, ctx, &["touch", "mkdirs"]);
    manager.run_all().await.unwrap();

    assert!(!dir.path().join("log.txt").exists());
    assert!(!dir.path().join("build").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_templates_expand_variables() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell(
        "greet",
        &["echo ${GREETING} ${GO} ${UNSET}end >> log.txt"],
    ));

    let mut config = Config::default();
    config.vars.insert("GREETING".to_string(), "hello".to_string());
    config.tools.go = "go1.22".to_string();
    let ctx = context(config, dir.path());
    let manager = manager(registry, ctx, &["greet"]);
    manager.run_all().await.unwrap();

    assert_eq!(log_of(dir.path()), "hello go1.22 end\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_children_see_exported_environment() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell(
        "env",
        &["printf '%s|%s|%s\\n' \"$GOBIN\" \"$GOOS\" \"$EXTRA\" >> log.txt"],
    ));

    let mut config = Config::default();
    config.target.os = Some("windows".to_string());
    config
        .export
        .vars
        .insert("EXTRA".to_string(), "yes".to_string());
    let ctx = context(config, dir.path());
    let manager = manager(registry, ctx, &["env"]);
    manager.run_all().await.unwrap();

    let bin = dir.path().join("bin");
    assert_eq!(
        log_of(dir.path()),
        format!("{}|windows|yes\n", bin.display())
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_mkdirs_then_clean() {
    let dir = tempfile::tempdir().unwrap();
    let registry = TaskRegistry::from_config(&Config::default()).unwrap();
    let registry = Arc::new(registry);
    let ctx = context(Config::default(), dir.path());

    let mut create = TaskManager::new(Arc::clone(&registry), ctx.clone());
    create.add("mkdirs");
    create.run_all().await.unwrap();
    assert!(dir.path().join("build").is_dir());
    assert!(dir.path().join("bin").is_dir());

    let mut clean = TaskManager::new(registry, ctx);
    clean.add("clean");
    clean.run_all().await.unwrap();
    assert!(!dir.path().join("build").exists());
    assert!(!dir.path().join("bin").exists());
}

#[tokio::test]
async fn test_clean_refuses_project_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.paths.build = ".".into();
    let registry = TaskRegistry::from_config(&config).unwrap();

    let ctx = context(config, dir.path());
    let manager = manager(registry, ctx, &["clean"]);
    let err = manager.run_all().await.unwrap_err();

    assert!(matches!(
        chore_error(&err),
        ChoreError::Config(inner) if matches!(**inner, ConfigError::InvalidValue { .. })
    ));
    assert!(dir.path().exists());
}

#[tokio::test]
async fn test_clean_refuses_parent_spellings() {
    for build in ["..", "sub/../..", "./build/../../."] {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.paths.build = build.into();
        let registry = TaskRegistry::from_config(&config).unwrap();

        let ctx = context(config, dir.path());
        let manager = manager(registry, ctx, &["clean"]);
        let err = manager.run_all().await.unwrap_err();

        assert!(
            matches!(
                chore_error(&err),
                ChoreError::Config(inner) if matches!(**inner, ConfigError::InvalidValue { .. })
            ),
            "{build} must be refused, got {err}"
        );
        assert!(dir.path().exists());
    }
}

#[tokio::test]
async fn test_mkdirs_accepts_dirs_that_stay_inside() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.global.dry = true;
    config.paths.build = "out/../build".into();
    let registry = TaskRegistry::from_config(&config).unwrap();

    let ctx = context(config, dir.path());
    let manager = manager(registry, ctx, &["mkdirs"]);
    assert!(manager.run_all().await.is_ok());
}

#[tokio::test]
async fn test_confirm_reads_injected_answer() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(TaskRegistry::from_config(&Config::default()).unwrap());
    let ctx = context(Config::default(), dir.path());

    let mut accepted = TaskManager::new(Arc::clone(&registry), ctx.clone())
        .with_input(Cursor::new(b"y\n".to_vec()));
    accepted.add("confirm");
    assert!(accepted.run_all().await.is_ok());

    let mut declined =
        TaskManager::new(registry, ctx).with_input(Cursor::new(b"\n".to_vec()));
    declined.add("confirm");
    let err = declined.run_all().await.unwrap_err();
    assert_eq!(err.to_string(), "aborted by user");
}

#[tokio::test]
async fn test_confirm_failure_stops_the_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::from_config(&Config::default()).unwrap();
    registry.register(shell("after", &["echo after >> log.txt"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["confirm", "after"])
        .with_input(Cursor::new(b"n\n".to_vec()));
    assert!(manager.run_all().await.is_err());
    assert_eq!(log_of(dir.path()), "");
}

#[cfg(unix)]
#[tokio::test]
async fn test_require_empty_guard() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(TaskSpec::new(
        "quiet",
        "HELPERS",
        "",
        TaskAction::RequireEmpty {
            check: "true".to_string(),
            message: "unused".to_string(),
        },
    ));
    registry.register(TaskSpec::new(
        "noisy",
        "HELPERS",
        "",
        TaskAction::RequireEmpty {
            check: "echo ' M src/main.go'".to_string(),
            message: "working tree has uncommitted changes".to_string(),
        },
    ));
    let registry = Arc::new(registry);
    let ctx = context(Config::default(), dir.path());

    let mut ok = TaskManager::new(Arc::clone(&registry), ctx.clone());
    ok.add("quiet");
    assert!(ok.run_all().await.is_ok());

    let mut failing = TaskManager::new(registry, ctx);
    failing.add("noisy");
    let err = failing.run_all().await.unwrap_err();
    match chore_error(&err) {
        ChoreError::Guard(inner) => match &**inner {
            GuardError::NotEmpty { message, output } => {
                assert_eq!(message, "working tree has uncommitted changes");
                assert_eq!(output, "M src/main.go");
            }
            other => panic!("unexpected guard error {other:?}"),
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_disabled_task_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell("off", &["echo off >> log.txt"]).with_enabled(false));
    registry.register(shell("on", &["echo on >> log.txt"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["off", "on"]);
    manager.run_all().await.unwrap();
    assert_eq!(log_of(dir.path()), "on\n");
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::default();
    registry.register(shell("never", &["echo never >> log.txt"]));

    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["never"]);
    manager.interrupt_all();
    let err = manager.run_all().await.unwrap_err();

    assert!(matches!(
        chore_error(&err),
        ChoreError::Task(inner) if matches!(**inner, TaskError::Interrupted(_))
    ));
    assert_eq!(log_of(dir.path()), "");
}

/// Input whose reads block until the paired sender is dropped.
struct StalledInput(mpsc::Receiver<()>);

impl Read for StalledInput {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}

#[tokio::test]
async fn test_interrupt_while_waiting_for_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TaskRegistry::from_config(&Config::default()).unwrap();
    registry.register(shell("after", &["echo after >> log.txt"]));

    let (release, stalled) = mpsc::channel::<()>();
    let ctx = context(Config::default(), dir.path());
    let manager = manager(registry, ctx, &["confirm", "after"])
        .with_input(BufReader::new(StalledInput(stalled)));

    let token = manager.cancel_token();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        token.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), manager.run_all())
        .await
        .expect("confirmation must return once cancelled")
        .unwrap_err();

    assert!(matches!(
        chore_error(&err),
        ChoreError::Task(inner)
            if matches!(&**inner, TaskError::Interrupted(name) if name == "confirm")
    ));
    assert_eq!(log_of(dir.path()), "");
    drop(release);
}
