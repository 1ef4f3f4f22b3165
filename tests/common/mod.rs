//! Throwaway git repositories for integration tests.
#![allow(dead_code)]

use git2::{Commit, ObjectType, Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit a change to `file` with `message`, returning the new commit id
    pub fn commit(&self, file: &str, message: &str) -> Oid {
        fs::write(self.path().join(file), message).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// Lightweight tag on HEAD
    pub fn tag(&self, name: &str) {
        let head = self.repo.head().unwrap().peel(ObjectType::Commit).unwrap();
        self.repo.tag_lightweight(name, &head, false).unwrap();
    }

    /// Annotated tag on HEAD
    pub fn annotated_tag(&self, name: &str) {
        let head = self.repo.head().unwrap().peel(ObjectType::Commit).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        self.repo.tag(name, &head, &sig, name, false).unwrap();
    }

    /// Modify a tracked file without committing
    pub fn touch(&self, file: &str) {
        fs::write(self.path().join(file), "uncommitted edit").unwrap();
    }

    /// Cut history at `oid` the way `git clone --depth` does
    pub fn make_shallow(&self, oid: Oid) {
        fs::write(self.repo.path().join("shallow"), format!("{}\n", oid)).unwrap();
    }

    pub fn detach(&self, oid: Oid) {
        self.repo.set_head_detached(oid).unwrap();
    }
}
