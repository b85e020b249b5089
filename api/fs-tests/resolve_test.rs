use ramfs_api::error::FsError;
use ramfs_api::fs::{DirectorySupport, NamespaceSupport, PathSupport};

#[path = "utils.rs"]
mod utils;

#[test]
fn walks_segments_from_the_root() {
    let mut fs = utils::new_fs();
    let a = fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let b = fs.mkdir("/a/b", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let f = utils::mk_file(&mut fs, "/a/b/f", b"data");

    assert_eq!(fs.resolve_path("/a").unwrap(), a);
    assert_eq!(fs.resolve_path("/a/b").unwrap(), b);
    assert_eq!(fs.resolve_path("/a/b/f").unwrap(), f);

    //the leading slash is optional, an empty path names the starting node
    let root = fs.resolve_path("/").unwrap();
    assert_eq!(fs.resolve_path("").unwrap(), root);
    assert_eq!(fs.resolve_path("a/b").unwrap(), b);

    //an empty remainder after the last segment makes a trailing slash harmless
    assert_eq!(fs.resolve_path("/a/b/").unwrap(), b);
    assert_eq!(fs.resolve_path("/a/b/f/").unwrap(), f);
}

#[test]
fn dot_entries_resolve_through_the_listing() {
    let mut fs = utils::new_fs();
    let a = fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let b = fs.mkdir("/a/b", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let root = fs.resolve_path("/").unwrap();

    assert_eq!(fs.resolve_path("/a/.").unwrap(), a);
    assert_eq!(fs.resolve_path("/a/..").unwrap(), root);
    assert_eq!(fs.resolve_path("/a/b/../b").unwrap(), b);
    //the root's `..` loops back to the root
    assert_eq!(fs.resolve_path("/..").unwrap(), root);
    assert_eq!(fs.resolve_path("/../a").unwrap(), a);
}

#[test]
fn resolution_failures() {
    let mut fs = utils::new_fs();
    utils::mk_file(&mut fs, "/f", b"x");
    fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();

    assert_eq!(fs.resolve_path("/missing"), Err(FsError::NoEntry));
    assert_eq!(fs.resolve_path("/a/missing"), Err(FsError::NoEntry));
    //a non-terminal segment resolving to a regular file
    assert_eq!(fs.resolve_path("/f/x"), Err(FsError::NotADirectory));
    //an empty segment never matches an entry
    assert_eq!(fs.resolve_path("/a//f"), Err(FsError::NoEntry));
}

#[test]
fn whole_name_must_match() {
    let mut fs = utils::new_fs();
    let ab = utils::mk_file(&mut fs, "/ab", b"");

    //a stored name must match the segment in full, not merely as a prefix
    assert_eq!(fs.resolve_path("/a"), Err(FsError::NoEntry));
    assert_eq!(fs.resolve_path("/abc"), Err(FsError::NoEntry));

    let a = utils::mk_file(&mut fs, "/a", b"");
    assert_eq!(fs.resolve_path("/a").unwrap(), a);
    assert_eq!(fs.resolve_path("/ab").unwrap(), ab);
}

#[test]
fn parent_resolution() {
    let mut fs = utils::new_fs();
    let root = fs.resolve_path("/").unwrap();
    let a = fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    utils::mk_file(&mut fs, "/f", b"");

    //the filename itself does not need to exist yet
    assert_eq!(fs.resolve_parent("/new").unwrap(), (root, "new"));
    assert_eq!(fs.resolve_parent("/a/new").unwrap(), (a, "new"));
    assert_eq!(fs.resolve_parent("/a/x.txt").unwrap(), (a, "x.txt"));

    //mutating operations only accept absolute paths
    assert_eq!(fs.resolve_parent("relative"), Err(FsError::InvalidPath));
    assert_eq!(fs.resolve_parent(""), Err(FsError::NoEntry));
    assert_eq!(fs.resolve_parent("/"), Err(FsError::NoEntry));
    assert_eq!(fs.resolve_parent("/a/"), Err(FsError::NoEntry));
    assert_eq!(fs.resolve_parent("/f/x"), Err(FsError::NotADirectory));
    assert_eq!(fs.resolve_parent("/missing/x"), Err(FsError::NoEntry));
}

#[test]
fn dir_level_queries() {
    let mut fs = utils::new_fs();
    let root = fs.resolve_path("/").unwrap();
    let a = fs.mkdir("/a", utils::DIR_MODE, utils::UID, utils::GID).unwrap();
    let f = utils::mk_file(&mut fs, "/a/f", b"");

    assert_eq!(fs.dir_lookup(root, "a").unwrap(), a);
    assert_eq!(fs.dir_lookup(a, "f").unwrap(), f);
    assert_eq!(fs.dir_lookup(a, "."), Ok(a));
    assert_eq!(fs.dir_lookup(a, ".."), Ok(root));
    assert_eq!(fs.dir_lookup(root, "missing"), Err(FsError::NoEntry));
    assert_eq!(fs.dir_lookup(f, "x"), Err(FsError::NotADirectory));

    assert_eq!(fs.dir_is_empty(root), Ok(false));
    assert_eq!(fs.dir_is_empty(a), Ok(false));
    fs.unlink("/a/f").unwrap();
    assert_eq!(fs.dir_is_empty(a), Ok(true));
}
