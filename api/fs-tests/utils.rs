#![allow(dead_code)]

//Some more general testing utilities
use std::collections::{HashMap, HashSet};

use ramfs_api::fs::{
    DirStreamSupport, FileRWSupport, FileSysSupport, NamespaceSupport, PathSupport,
};
use ramfs_api::types::{FileKind, NodeId};

use crate::fs::RamFs;

pub const FILE_MODE: u32 = 0o644;
pub const DIR_MODE: u32 = 0o755;
pub const UID: u32 = 1000;
pub const GID: u32 = 100;

pub fn new_fs() -> RamFs {
    RamFs::init().unwrap()
}

//Create a regular file at `path` holding `data`
pub fn mk_file(fs: &mut RamFs, path: &str, data: &[u8]) -> NodeId {
    let id = fs.mknod(path, FILE_MODE, UID, GID).unwrap();
    if !data.is_empty() {
        let fh = fs.open(path).unwrap();
        assert_eq!(fs.write(fh, data, 0).unwrap(), data.len() as u64);
        fs.release(fh).unwrap();
    }
    id
}

//Open `path`, read everything, release
pub fn read_via(fs: &mut RamFs, path: &str) -> Vec<u8> {
    let fh = fs.open(path).unwrap();
    let data = fs.read(fh, 0, u64::MAX).unwrap().to_vec();
    fs.release(fh).unwrap();
    data
}

//Entry names of the directory at `path`, in listing order
pub fn names(fs: &mut RamFs, path: &str) -> Vec<String> {
    let dh = fs.opendir(path).unwrap();
    let entries = fs.readdir(dh).unwrap();
    fs.releasedir(dh).unwrap();
    entries.into_iter().map(|e| e.name).collect()
}

//Walk the whole tree through the public surface and verify the structural
//invariants: the dot entries come first and point at the right nodes, names
//are unique per listing, a directory's link count is 2 plus its number of
//subdirectories, and a file's link count equals the number of entries
//referring to it anywhere in the tree.
//Note: only meaningful while every directory sits under its original parent;
//a cross-directory rename of a directory leaves its `..` with the old parent
//on purpose, which this walk would flag.
pub fn check_invariants(fs: &mut RamFs) {
    let mut file_refs: HashMap<NodeId, u32> = HashMap::new();
    let mut file_links: HashMap<NodeId, u32> = HashMap::new();
    let root = fs.resolve_path("/").unwrap();
    walk(fs, "", root, root, &mut file_refs, &mut file_links);
    for (id, seen) in file_refs {
        assert_eq!(file_links[&id], seen, "link count of file node {}", id);
    }
}

fn walk(
    fs: &mut RamFs,
    path: &str,
    id: NodeId,
    parent: NodeId,
    file_refs: &mut HashMap<NodeId, u32>,
    file_links: &mut HashMap<NodeId, u32>,
) {
    let display = if path.is_empty() { "/" } else { path };
    let dh = fs.opendir(display).unwrap();
    let entries = fs.readdir(dh).unwrap();
    fs.releasedir(dh).unwrap();

    assert_eq!(entries[0].name, ".");
    assert_eq!(entries[0].node, id, "`.` of {} must point at itself", display);
    assert_eq!(entries[1].name, "..");
    assert_eq!(
        entries[1].node, parent,
        "`..` of {} must point at its parent",
        display
    );

    let mut seen = HashSet::new();
    for e in &entries {
        assert!(
            seen.insert(e.name.clone()),
            "duplicate name {:?} in {}",
            e.name,
            display
        );
    }

    let mut subdirs = 0;
    for e in entries.iter().skip(2) {
        let child = format!("{}/{}", path, e.name);
        let attr = fs.getattr(&child).unwrap();
        match FileKind::from_mode(attr.mode).unwrap() {
            FileKind::Directory => {
                subdirs += 1;
                walk(fs, &child, e.node, id, file_refs, file_links);
            }
            FileKind::Regular => {
                *file_refs.entry(e.node).or_insert(0) += 1;
                file_links.insert(e.node, attr.nlink);
            }
        }
    }

    let attr = fs.getattr(display).unwrap();
    assert_eq!(
        attr.nlink,
        2 + subdirs,
        "directory link count of {}",
        display
    );
}
