use ramfs_api::fs::{DirStreamSupport, FileRWSupport, FileSysSupport, NamespaceSupport};

#[path = "utils.rs"]
mod utils;

#[test]
fn destroys_a_fresh_filesystem() {
    utils::new_fs().destroy();
}

#[test]
fn destroys_a_cyclic_tree() {
    let mut fs = utils::new_fs();

    //several levels of directories, each one a `.`/`..` cycle with its parent
    fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    fs.mkdir("/a/b", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    fs.mkdir("/a/b/c", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    utils::mk_file(&mut fs, "/a/b/c/deep", b"bytes");
    utils::mk_file(&mut fs, "/top", b"more bytes");

    //hard links across directories make the same file reachable twice
    fs.link("/a/b/c/deep", "/a/also-deep").unwrap();
    fs.link("/top", "/a/b/top-again").unwrap();

    fs.destroy();
}

#[test]
fn destroys_despite_orphans_and_open_handles() {
    let mut fs = utils::new_fs();

    //an orphan: unlinked but held open
    utils::mk_file(&mut fs, "/gone", b"still here");
    let orphan = fs.open("/gone").unwrap();
    fs.unlink("/gone").unwrap();
    assert_eq!(fs.read(orphan, 0, 10).unwrap(), b"still here");

    //a reachable file and a directory still held open at shutdown
    utils::mk_file(&mut fs, "/f", b"");
    let _fh = fs.open("/f").unwrap();
    fs.mkdir("/d", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let _dh = fs.opendir("/d").unwrap();

    //teardown diagnoses the open handles and still releases everything
    fs.destroy();
}
