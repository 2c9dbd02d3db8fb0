// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::current_env;
use crate::core::env::container::Env;
use crate::core::env::types::EnvFlags;

#[test]
fn test_env_basic_operations() {
    let mut env = Env::new();
    env.set("FOO", "bar");

    assert_eq!(env.get("FOO"), Some("bar"));
    assert_eq!(env.get("NOTEXIST"), None);
    assert_eq!(env.get("foo").is_some(), cfg!(windows));
}

#[test]
fn test_env_flags() {
    let mut env = Env::new();
    env.set("KEY", "initial");
    env.set_with_flags("KEY", "_appended", EnvFlags::Append);
    env.set_with_flags("KEY", "prepended_", EnvFlags::Prepend);
    env.set_with_flags("NEW", "value", EnvFlags::Append);

    assert_eq!(env.get("KEY"), Some("prepended_initial_appended"));
    assert_eq!(env.get("NEW"), Some("value"));
}

#[test]
fn test_prepend_path_uses_given_separator() {
    let mut posix = Env::new();
    posix.set("PATH", "/usr/bin:/bin");
    posix.prepend_path("/work/bin", ':');
    insta::assert_snapshot!(posix.get("PATH").unwrap(), @"/work/bin:/usr/bin:/bin");

    let mut windows = Env::new();
    windows.set("PATH", r"C:\Windows");
    windows.prepend_path(r"C:\work\bin", ';');
    insta::assert_snapshot!(windows.get("PATH").unwrap(), @r"C:\work\bin;C:\Windows");
}

#[test]
fn test_prepend_path_without_existing_path() {
    let mut env = Env::new();
    env.prepend_path("/work/bin", ':');
    assert_eq!(env.get("PATH"), Some("/work/bin"));
}

#[test]
fn test_clone_is_copy_on_write() {
    let mut original = Env::new();
    original.set("SHARED", "1");

    let mut copy = original.clone();
    copy.set("SHARED", "2");
    copy.remove("MISSING");

    assert_eq!(original.get("SHARED"), Some("1"));
    assert_eq!(copy.get("SHARED"), Some("2"));
}

#[test]
fn test_env_to_map_is_sorted() {
    let mut env = Env::new();
    env.set("KEY2", "value2");
    env.set("KEY1", "value1");

    let keys: Vec<_> = env.to_map().into_keys().collect();
    assert_eq!(keys, ["KEY1", "KEY2"]);
    assert_eq!(env.len(), 2);
}

#[test]
fn test_current_env_is_captured() {
    let env = current_env();
    assert_eq!(env.is_empty(), std::env::vars().next().is_none());
}
