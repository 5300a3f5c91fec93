//! Purpose: Integration tests for the save-mode session flags.
//! Exports: None (integration test module).
//! Role: Validate backup, newfile, and no-op save behavior on disk.
//! Invariants: Every session runs against a private temp root.

use std::fs;
use std::path::Path;

use augeas::api::{Augeas, Flags, Transform};

const HOSTS: &str = "127.0.0.1 localhost\n192.168.0.1 gateway gw\n";

fn hosts_root() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let etc = temp.path().join("etc");
    fs::create_dir_all(&etc).expect("mkdir etc");
    fs::write(etc.join("hosts"), HOSTS).expect("write hosts");
    temp
}

fn open_hosts_with(root: &Path, flags: Flags) -> Augeas {
    let mut session =
        Augeas::open(root.to_str(), None, Flags::NO_MODL_AUTOLOAD | flags).expect("open");
    session.transform(&Transform::new("Hosts.lns").incl("/etc/hosts")).expect("transform");
    session.load().expect("load");
    session
}

#[test]
fn save_noop_simulates_without_touching_files() {
    let temp = hosts_root();
    let mut session = open_hosts_with(temp.path(), Flags::SAVE_NOOP);

    session.set("/files/etc/hosts/1/ipaddr", Some("10.0.0.1")).expect("set");
    session.save().expect("save");

    let on_disk = fs::read_to_string(temp.path().join("etc/hosts")).expect("read back");
    assert_eq!(on_disk, HOSTS);

    // The simulated save still records which files would have changed.
    let saved = session.matches("/augeas/events/saved").expect("match");
    assert_eq!(saved.len(), 1);
    assert_eq!(session.get(&saved[0]).expect("get"), Some("/files/etc/hosts".to_string()));
}

#[test]
fn save_backup_keeps_the_original_aside() {
    let temp = hosts_root();
    let mut session = open_hosts_with(temp.path(), Flags::SAVE_BACKUP);

    session.set("/files/etc/hosts/1/ipaddr", Some("10.0.0.1")).expect("set");
    session.save().expect("save");

    let on_disk = fs::read_to_string(temp.path().join("etc/hosts")).expect("read back");
    assert!(on_disk.contains("10.0.0.1"));

    let backup = fs::read_to_string(temp.path().join("etc/hosts.augsave")).expect("read backup");
    assert_eq!(backup, HOSTS);
}

#[test]
fn save_newfile_writes_alongside_the_original() {
    let temp = hosts_root();
    let mut session = open_hosts_with(temp.path(), Flags::SAVE_NEWFILE);

    session.set("/files/etc/hosts/1/ipaddr", Some("10.0.0.1")).expect("set");
    session.save().expect("save");

    let on_disk = fs::read_to_string(temp.path().join("etc/hosts")).expect("read back");
    assert_eq!(on_disk, HOSTS);

    let staged = fs::read_to_string(temp.path().join("etc/hosts.augnew")).expect("read augnew");
    assert!(staged.contains("10.0.0.1"));
}

#[test]
fn newfile_takes_precedence_over_backup() {
    let temp = hosts_root();
    let mut session = open_hosts_with(temp.path(), Flags::SAVE_NEWFILE | Flags::SAVE_BACKUP);

    session.set("/files/etc/hosts/1/ipaddr", Some("10.0.0.1")).expect("set");
    session.save().expect("save");

    let on_disk = fs::read_to_string(temp.path().join("etc/hosts")).expect("read back");
    assert_eq!(on_disk, HOSTS);
    assert!(temp.path().join("etc/hosts.augnew").exists());
    assert!(!temp.path().join("etc/hosts.augsave").exists());
}

#[test]
fn save_with_no_pending_edits_changes_nothing() {
    let temp = hosts_root();
    let mut session = open_hosts_with(temp.path(), Flags::NONE);

    session.save().expect("save");

    let on_disk = fs::read_to_string(temp.path().join("etc/hosts")).expect("read back");
    assert_eq!(on_disk, HOSTS);
    assert!(session.matches("/augeas/events/saved").expect("match").is_empty());
}
