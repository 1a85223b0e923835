use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// One node of a scanned directory tree.
///
/// `children` is `None` for files, for directories past the depth limit,
/// and for directories whose entries could not be listed. It is omitted
/// from JSON in all of those cases; an expanded but empty directory
/// serializes as `"children": []`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// Builds the tree rooted at `root`, expanding directories `max_depth`
/// levels below it.
///
/// With `max_depth` 0 the immediate children appear as unexpanded leaves.
/// Entries within each directory come back sorted by name. Entries that
/// fail to stat and subdirectories that fail to list are skipped rather
/// than failing the whole scan; only an unreadable `root` is an error.
/// Symlinks are reported as file leaves and never followed.
pub fn scan_directory(root: &Path, max_depth: usize) -> io::Result<FileNode> {
    let children = scan_children(root, max_depth)?;
    Ok(FileNode {
        name: node_name(root),
        kind: NodeKind::Directory,
        children: Some(children),
    })
}

fn node_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

fn scan_children(dir: &Path, depth_left: usize) -> io::Result<Vec<FileNode>> {
    let mut nodes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let Ok(file_type) = entry.file_type() else { continue };
        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_dir() {
            let children = if depth_left > 0 {
                // An unlistable subdirectory keeps its node, just unexpanded.
                scan_children(&entry.path(), depth_left - 1).ok()
            } else {
                None
            };
            nodes.push(FileNode {
                name,
                kind: NodeKind::Directory,
                children,
            });
        } else {
            // file_type() does not follow links, so symlinks land here.
            nodes.push(FileNode {
                name,
                kind: NodeKind::File,
                children: None,
            });
        }
    }
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn fixture() -> assert_fs::TempDir {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("b.txt").write_str("b").unwrap();
        tmp.child("a.txt").write_str("a").unwrap();
        tmp.child("sub/inner.txt").write_str("inner").unwrap();
        tmp.child("sub/deeper/leaf.txt").write_str("leaf").unwrap();
        tmp
    }

    fn child<'a>(node: &'a FileNode, name: &str) -> &'a FileNode {
        node.children
            .as_ref()
            .unwrap()
            .iter()
            .find(|n| n.name == name)
            .unwrap()
    }

    #[test]
    fn depth_zero_lists_children_as_leaves() {
        let tmp = fixture();
        let tree = scan_directory(tmp.path(), 0).unwrap();
        assert_eq!(tree.kind, NodeKind::Directory);
        let names: Vec<&str> = tree
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
        // The subdirectory is present but unexpanded.
        let sub = child(&tree, "sub");
        assert_eq!(sub.kind, NodeKind::Directory);
        assert!(sub.children.is_none());
    }

    #[test]
    fn deeper_levels_expand_until_the_limit() {
        let tmp = fixture();
        let tree = scan_directory(tmp.path(), 1).unwrap();
        let sub = child(&tree, "sub");
        let names: Vec<&str> = sub
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["deeper", "inner.txt"]);
        // One level past the limit stays closed.
        assert!(child(sub, "deeper").children.is_none());

        let tree = scan_directory(tmp.path(), 2).unwrap();
        let deeper = child(child(&tree, "sub"), "deeper");
        assert_eq!(
            deeper.children.as_ref().unwrap()[0].name,
            "leaf.txt".to_string()
        );
    }

    #[test]
    fn expanded_empty_directory_keeps_empty_children() {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("empty").create_dir_all().unwrap();
        let tree = scan_directory(tmp.path(), 1).unwrap();
        let empty = child(&tree, "empty");
        assert_eq!(empty.children, Some(vec![]));
    }

    #[test]
    fn entries_come_back_sorted_by_name() {
        let tmp = assert_fs::TempDir::new().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            tmp.child(name).write_str("x").unwrap();
        }
        let tree = scan_directory(tmp.path(), 0).unwrap();
        let names: Vec<&str> = tree
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_a_file_leaf() {
        let tmp = fixture();
        std::os::unix::fs::symlink(tmp.path().join("sub"), tmp.path().join("sublink")).unwrap();
        let tree = scan_directory(tmp.path(), 3).unwrap();
        let link = child(&tree, "sublink");
        assert_eq!(link.kind, NodeKind::File);
        assert!(link.children.is_none());
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(scan_directory(&missing, 1).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_subdirectory_keeps_an_unexpanded_node() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("locked/hidden.txt").write_str("x").unwrap();
        let locked = tmp.path().join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        // Root can list regardless of mode bits; only assert when the
        // permission change actually bites.
        if std::fs::read_dir(&locked).is_err() {
            let tree = scan_directory(tmp.path(), 2).unwrap();
            let node = child(&tree, "locked");
            assert_eq!(node.kind, NodeKind::Directory);
            assert!(node.children.is_none());
        }
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn json_shape_matches_the_wire_contract() {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("only.txt").write_str("x").unwrap();
        let tree = scan_directory(tmp.path(), 0).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        let first = &json["children"][0];
        assert_eq!(first["name"], "only.txt");
        assert_eq!(first["type"], "file");
        // Unexpanded nodes omit the key entirely.
        assert!(first.get("children").is_none());
    }
}
