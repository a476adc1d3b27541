use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, info, warn};
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs::{self, hard_link, File};
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

use crate::shell::config::{
    CloneDirectoryConf, ConfigEntry, DirectoryConf, FileConf, LinkConf, SandboxConf,
};
use crate::shell::emulator_error::{Result, ShellError};
use crate::shell::file_content::FileContent;

/// Temporary root directory of an emulator session.
///
/// The directory gets a random suffix so several sessions can share one start point.
/// It is filled with the configured content on creation and removed with everything
/// inside it when the `Sandbox` is dropped.
///
/// ```rust
/// use shell_emulator::config::SandboxConf;
/// use shell_emulator::sandbox::Sandbox;
///
/// let conf = SandboxConf {
///     start_point: String::new(),
///     name: String::from("doc_sandbox"),
///     links_allowed: false,
///     content: Vec::new(),
/// };
/// let sandbox = Sandbox::create(&conf).unwrap();
/// let path = sandbox.path().to_path_buf();
/// assert!(path.is_dir());
///
/// drop(sandbox);
/// assert!(!path.exists());
/// ```
#[derive(Debug)]
pub struct Sandbox {
    path: PathBuf,
}

impl Sandbox {
    fn get_random_code() -> u64 {
        rand::rng().random::<u64>()
    }

    fn gen_root_path(start_point: &Path, name: &str) -> PathBuf {
        start_point.join(format!("{}_{}", name, Self::get_random_code()))
    }

    fn resolve_start_point(start_point: &str) -> Result<PathBuf> {
        let start_point = if start_point.is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(start_point)
        };

        // The root path has to be absolute, the emulator never follows the process cwd.
        match std::fs::canonicalize(&start_point) {
            Ok(path) if path.is_dir() => Ok(path),
            _ => Err(ShellError::ShouldStartFromDirectory),
        }
    }

    async fn create_dir(dirname: &Path) -> Result<()> {
        fs::create_dir_all(dirname).await?;
        Ok(())
    }

    async fn copy_dir(src_path: &Path, dst_path: &Path) -> Result<()> {
        Self::create_dir(dst_path).await?;
        for entry in WalkDir::new(src_path).min_depth(1) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(src_path)
                .map_err(|_| ShellError::InvalidArgument(entry.path().display().to_string()))?;
            let dst_entry_path = dst_path.join(relative);
            let file_type = entry.file_type();
            if file_type.is_dir() {
                Self::create_dir(&dst_entry_path).await?;
            } else if file_type.is_file() {
                let mut src_file = File::open(entry.path()).await?;
                let mut dst_file = File::create(&dst_entry_path).await?;
                tokio::io::copy(&mut src_file, &mut dst_file).await?;
            }
        }
        Ok(())
    }

    async fn create_file(conf: &FileConf, dir_path: &Path) -> Result<()> {
        let dst_file_name = dir_path.join(&conf.name);
        let mut dst_file = File::create(&dst_file_name).await?;

        match &conf.content {
            FileContent::InlineBytes(data) => {
                dst_file.write_all(data).await?;
            }
            FileContent::InlineText(text) => {
                dst_file.write_all(text.as_bytes()).await?;
            }
            FileContent::OriginalFile(file_path) => {
                let mut src_file = File::open(file_path).await?;
                tokio::io::copy(&mut src_file, &mut dst_file).await?;
            }
            FileContent::Empty => {}
        }
        dst_file.flush().await?;

        debug!("created file {}", dst_file_name.display());
        Ok(())
    }

    /// Writing through a hard link changes the original file as well.
    async fn create_link(conf: &LinkConf, dir_path: &Path, links_allowed: bool) -> Result<()> {
        if !links_allowed {
            return Err(ShellError::LinksNotAllowed);
        }
        let link_name = dir_path.join(&conf.name);
        hard_link(&conf.target, &link_name).await?;

        debug!("linked {} to {}", link_name.display(), conf.target);
        Ok(())
    }

    async fn clone_directory(conf: &CloneDirectoryConf, parent_path: &Path) -> Result<()> {
        let dst_dir_path = parent_path.join(&conf.name);
        let src_dir_path = parent_path.join(&conf.source);
        if !src_dir_path.is_dir() {
            return Err(ShellError::NotFound(src_dir_path.display().to_string()));
        }

        // WalkDir would descend into the copy while it is being written.
        let src_dir_path = std::fs::canonicalize(&src_dir_path)?;
        if std::fs::canonicalize(parent_path)?.starts_with(&src_dir_path) {
            return Err(ShellError::InvalidArgument(format!(
                "{}: cannot clone a directory into itself",
                conf.source
            )));
        }

        Self::copy_dir(&src_dir_path, &dst_dir_path).await
    }

    async fn build_directory(
        directory_conf: &DirectoryConf,
        parent_path: &Path,
        links_allowed: bool,
    ) -> Result<()> {
        let dst_dir_path = parent_path.join(&directory_conf.name);
        Self::create_dir(&dst_dir_path).await?;
        Self::fill_directory(&directory_conf.content, &dst_dir_path, links_allowed).await
    }

    async fn fill_directory(
        entries: &[ConfigEntry],
        dir_path: &Path,
        links_allowed: bool,
    ) -> Result<()> {
        for entry in entries {
            match entry {
                ConfigEntry::Directory(conf) => {
                    Self::build_directory_boxed(conf, dir_path, links_allowed).await?
                }
                ConfigEntry::CloneDirectory(conf) => Self::clone_directory(conf, dir_path).await?,
                ConfigEntry::File(conf) => Self::create_file(conf, dir_path).await?,
                ConfigEntry::Link(conf) => Self::create_link(conf, dir_path, links_allowed).await?,
            }
        }
        Ok(())
    }

    fn build_directory_boxed<'a>(
        conf: &'a DirectoryConf,
        parent_path: &'a Path,
        links_allowed: bool,
    ) -> BoxFuture<'a, Result<()>> {
        async move { Self::build_directory(conf, parent_path, links_allowed).await }.boxed()
    }

    async fn populate(conf: &SandboxConf, path: &Path) -> Result<()> {
        Self::create_dir(path).await?;
        Self::fill_directory(&conf.content, path, conf.links_allowed).await
    }

    /// Creates the root directory inside `conf.start_point` and fills it with `conf.content`.
    /// A partially filled root is removed before the error is returned.
    pub fn create(conf: &SandboxConf) -> Result<Sandbox> {
        let start_point = Self::resolve_start_point(&conf.start_point)?;
        let path = Self::gen_root_path(&start_point, &conf.name);

        let runtime = tokio::runtime::Runtime::new()?;
        let result = runtime.block_on(Self::populate(conf, &path));

        if let Err(error) = result {
            if path.is_dir() {
                if let Err(e) = std::fs::remove_dir_all(&path) {
                    warn!("failed to clean up {}: {}", path.display(), e);
                }
            }
            return Err(error);
        }

        info!("sandbox root created at {}", path.display());
        Ok(Sandbox { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => info!("sandbox root {} removed", self.path.display()),
            Err(e) => warn!("failed to delete directory {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::config::parse_config;
    use crate::shell::config::RootConf;

    fn sandbox_conf(config_str: &str) -> SandboxConf {
        match parse_config(config_str).expect("valid config").root {
            RootConf::Sandbox(conf) => conf,
            RootConf::Existing(_) => panic!("sandbox root expected"),
        }
    }

    #[test]
    fn create_should_fail_when_start_point_is_missing() {
        let conf = sandbox_conf(
            "
root: !sandbox
  start_point: unexisting_directory
  name: test
",
        );
        let res = Sandbox::create(&conf);
        assert!(res.is_err_and(|error| error.is_should_start_from_directory()));
    }

    #[test]
    fn create_should_fill_nested_content() -> Result<()> {
        let conf = sandbox_conf(
            r#"
root: !sandbox
  name: nested
  content:
    - !file
        name: test_from_cargo.toml
        content: !original_file Cargo.toml
    - !directory
        name: dir_1_1
        content:
          - !file
              name: text_test.txt
              content: !inline_text "test"
          - !directory
              name: dir_2_1
              content:
                - !file
                    name: empty_file.txt
                    content: !empty
    - !directory
        name: dir_1_2
"#,
        );
        let sandbox = Sandbox::create(&conf)?;
        let root = sandbox.path();

        assert!(root.is_absolute());
        assert!(std::fs::metadata(root.join("test_from_cargo.toml"))?.len() > 0);
        assert_eq!(
            std::fs::read_to_string(root.join("dir_1_1").join("text_test.txt"))?,
            "test"
        );
        assert_eq!(
            std::fs::metadata(root.join("dir_1_1/dir_2_1/empty_file.txt"))?.len(),
            0
        );
        assert!(root.join("dir_1_2").is_dir());
        Ok(())
    }

    #[test]
    fn clone_directory_copies_the_whole_tree() -> Result<()> {
        let conf = sandbox_conf(
            r#"
root: !sandbox
  name: clone
  content:
    - !directory
        name: original
        content:
          - !file
              name: a.txt
              content: !inline_text "a"
          - !directory
              name: inner
              content:
                - !file
                    name: b.txt
                    content: !inline_text "b"
    - !clone_directory
        name: copy
        source: original
"#,
        );
        let sandbox = Sandbox::create(&conf)?;
        let copy = sandbox.path().join("copy");

        assert_eq!(std::fs::read_to_string(copy.join("a.txt"))?, "a");
        assert_eq!(std::fs::read_to_string(copy.join("inner/b.txt"))?, "b");
        Ok(())
    }

    #[test]
    fn links_are_rejected_unless_allowed() {
        let conf = sandbox_conf(
            "
root: !sandbox
  name: link
  content:
    - !link
        name: cargo_link
        target: Cargo.toml
",
        );
        let res = Sandbox::create(&conf);
        assert!(res.is_err_and(|error| error.is_links_not_allowed()));
    }

    #[test]
    fn links_point_to_the_target_when_allowed() -> Result<()> {
        let start_point = tempfile::tempdir()?;
        let target = start_point.path().join("target.txt");
        std::fs::write(&target, "line1\nline2\n")?;

        let conf = SandboxConf {
            start_point: start_point.path().display().to_string(),
            name: String::from("linked"),
            links_allowed: true,
            content: vec![ConfigEntry::Link(LinkConf {
                name: String::from("target_link"),
                target: target.display().to_string(),
            })],
        };
        let sandbox = Sandbox::create(&conf)?;
        let link = sandbox.path().join("target_link");

        assert!(std::fs::metadata(&link)?.is_file());
        assert_eq!(std::fs::read_to_string(&link)?, "line1\nline2\n");
        Ok(())
    }

    #[test]
    fn clone_directory_rejects_its_own_ancestor() {
        let start_point = tempfile::tempdir().expect("temp dir");
        let conf = SandboxConf {
            start_point: start_point.path().display().to_string(),
            name: String::from("self_clone"),
            links_allowed: false,
            content: vec![ConfigEntry::Directory(DirectoryConf {
                name: String::from("inner"),
                content: vec![ConfigEntry::CloneDirectory(CloneDirectoryConf {
                    name: String::from("copy"),
                    source: String::from(".."),
                })],
            })],
        };

        let res = Sandbox::create(&conf);
        assert!(matches!(res, Err(ShellError::InvalidArgument(_))));
        let leftovers = std::fs::read_dir(start_point.path())
            .expect("readable temp dir")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn failed_creation_leaves_nothing_behind() {
        let start_point = tempfile::tempdir().expect("temp dir");
        let conf = SandboxConf {
            start_point: start_point.path().display().to_string(),
            name: String::from("broken"),
            links_allowed: false,
            content: vec![ConfigEntry::File(FileConf {
                name: String::from("copy.txt"),
                content: FileContent::OriginalFile(String::from("no_such_original_file")),
            })],
        };

        assert!(Sandbox::create(&conf).is_err());
        let leftovers = std::fs::read_dir(start_point.path())
            .expect("readable temp dir")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn drop_removes_the_root() -> Result<()> {
        let conf = sandbox_conf(
            "
root: !sandbox
  name: dropped
  content:
    - !directory
        name: inner
",
        );
        let sandbox = Sandbox::create(&conf)?;
        let path = sandbox.path().to_path_buf();
        assert!(path.join("inner").is_dir());

        drop(sandbox);
        assert!(!path.exists());
        Ok(())
    }
}
