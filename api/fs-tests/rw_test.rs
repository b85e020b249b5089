use ramfs_api::error::FsError;
use ramfs_api::fs::{FileRWSupport, NamespaceSupport};
use ramfs_api::types::FileHandle;

#[path = "utils.rs"]
mod utils;

#[test]
fn write_then_read_round_trip() {
    let mut fs = utils::new_fs();
    fs.mknod("/f", utils::FILE_MODE, utils::UID, utils::GID).unwrap();

    let fh = fs.open("/f").unwrap();
    assert_eq!(fs.write(fh, b"content", 0).unwrap(), 7);
    assert_eq!(fs.read(fh, 0, 7).unwrap(), b"content");
    assert_eq!(fs.getattr("/f").unwrap().size, 7);

    //overwrite in the middle without growing
    assert_eq!(fs.write(fh, b"ON", 1).unwrap(), 2);
    assert_eq!(fs.read(fh, 0, 7).unwrap(), b"cONtent");
    assert_eq!(fs.getattr("/f").unwrap().size, 7);

    //overwrite crossing the end grows the file
    assert_eq!(fs.write(fh, b"tents", 3).unwrap(), 5);
    assert_eq!(fs.read(fh, 0, 64).unwrap(), b"cONtents");
    fs.release(fh).unwrap();
}

#[test]
fn reads_clamp_at_the_end() {
    let mut fs = utils::new_fs();
    utils::mk_file(&mut fs, "/f", b"0123456789");
    let fh = fs.open("/f").unwrap();

    //a read crossing the end returns exactly the bytes that exist
    assert_eq!(fs.read(fh, 4, 100).unwrap(), b"456789");
    //a read starting at or past the end is empty, not an error
    assert_eq!(fs.read(fh, 10, 1).unwrap(), b"");
    assert_eq!(fs.read(fh, 11, 1).unwrap(), b"");
    assert_eq!(fs.read(fh, 0, 0).unwrap(), b"");
    assert_eq!(fs.read(fh, 2, u64::MAX).unwrap(), b"23456789");
    fs.release(fh).unwrap();
}

#[test]
fn writes_past_the_end_zero_fill_the_gap() {
    let mut fs = utils::new_fs();
    fs.mknod("/f", utils::FILE_MODE, utils::UID, utils::GID).unwrap();
    let fh = fs.open("/f").unwrap();

    assert_eq!(fs.write(fh, b"xy", 5).unwrap(), 2);
    assert_eq!(fs.getattr("/f").unwrap().size, 7);
    assert_eq!(fs.read(fh, 0, 7).unwrap(), b"\0\0\0\0\0xy");
    fs.release(fh).unwrap();
}

#[test]
fn write_at_a_pathological_offset_is_out_of_space() {
    let mut fs = utils::new_fs();
    fs.mknod("/f", utils::FILE_MODE, utils::UID, utils::GID).unwrap();
    let fh = fs.open("/f").unwrap();

    //an end-of-write the file can never reach, with and without overflow
    assert_eq!(fs.write(fh, b"x", u64::MAX), Err(FsError::OutOfSpace));
    assert_eq!(fs.write(fh, b"x", u64::MAX - 1), Err(FsError::OutOfSpace));

    //the failed writes left the file untouched
    assert_eq!(fs.getattr("/f").unwrap().size, 0);
    assert_eq!(fs.read(fh, 0, 1).unwrap(), b"");
    fs.release(fh).unwrap();
}

#[test]
fn unlinked_open_file_stays_usable() {
    let mut fs = utils::new_fs();
    fs.mknod("/f", utils::FILE_MODE, utils::UID, utils::GID).unwrap();
    let fh = fs.open("/f").unwrap();

    //the name disappears, the node survives as an orphan
    fs.unlink("/f").unwrap();
    assert_eq!(fs.getattr("/f"), Err(FsError::NoEntry));
    assert_eq!(fs.node_count(), 2);

    assert_eq!(fs.write(fh, b"xy", 0).unwrap(), 2);
    assert_eq!(fs.read(fh, 0, 2).unwrap(), b"xy");

    //the final release destroys the orphan
    fs.release(fh).unwrap();
    assert_eq!(fs.node_count(), 1);
    assert_eq!(fs.read(fh, 0, 2), Err(FsError::BadHandle));
}

#[test]
fn orphan_outlives_all_but_the_last_handle() {
    let mut fs = utils::new_fs();
    utils::mk_file(&mut fs, "/f", b"keep");
    let h1 = fs.open("/f").unwrap();
    let h2 = fs.open("/f").unwrap();

    fs.unlink("/f").unwrap();
    fs.release(h1).unwrap();
    assert_eq!(fs.read(h2, 0, 4).unwrap(), b"keep");
    fs.release(h2).unwrap();
    assert_eq!(fs.node_count(), 1);
}

#[test]
fn handle_misuse() {
    let mut fs = utils::new_fs();
    fs.mkdir("/d", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    utils::mk_file(&mut fs, "/f", b"x");

    assert_eq!(fs.open("/d"), Err(FsError::IsADirectory));
    assert_eq!(fs.open("/missing"), Err(FsError::NoEntry));

    //a handle is dead once released
    let fh = fs.open("/f").unwrap();
    fs.release(fh).unwrap();
    assert_eq!(fs.read(fh, 0, 1), Err(FsError::BadHandle));
    assert_eq!(fs.write(fh, b"y", 0), Err(FsError::BadHandle));
    assert_eq!(fs.release(fh), Err(FsError::BadHandle));

    //a handle the core never issued
    let forged = FileHandle { node: 4096 };
    assert_eq!(fs.read(forged, 0, 1), Err(FsError::BadHandle));
}
