//! The `config` module describes the emulator session: who is shown in the prompt,
//! where the root directory comes from and what it initially contains.
//! The configuration can be written in YAML or JSON.

pub mod clone_directory_conf;
pub mod config_entry;
pub mod directory_conf;
pub mod emulator_conf;
pub mod file_conf;
pub mod link_conf;
pub mod root_conf;
pub mod sandbox_conf;

pub use clone_directory_conf::CloneDirectoryConf;
pub use config_entry::ConfigEntry;
pub use directory_conf::DirectoryConf;
pub use emulator_conf::EmulatorConf;
pub use file_conf::FileConf;
pub use link_conf::LinkConf;
pub use root_conf::RootConf;
pub use sandbox_conf::SandboxConf;

use crate::shell::emulator_error::{Result, ShellError};

/// Parses the session configuration.
/// Text starting with `{` or `[` is treated as JSON, everything else as YAML.
///
/// ```rust
/// use shell_emulator::config::{parse_config, RootConf};
///
/// let conf = parse_config("
/// user: student
/// root: !existing /tmp
/// ").unwrap();
/// assert_eq!(conf.user.as_deref(), Some("student"));
/// assert_eq!(conf.root, RootConf::Existing(String::from("/tmp")));
/// ```
pub fn parse_config(config_str: &str) -> Result<EmulatorConf> {
    let config_str = config_str.trim_start();
    match config_str.chars().next() {
        Some('{') | Some('[') => Ok(serde_json::from_str(config_str)?),
        Some(_) => Ok(serde_yaml::from_str(config_str)?),
        None => Err(ShellError::EmptyConfig),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::file_content::FileContent;

    #[test]
    fn parser_should_reject_empty_config() {
        let res = parse_config("  \n ");
        assert!(res.is_err_and(|error| error.is_empty_config()));
    }

    #[test]
    fn parser_should_accept_yaml_sandbox_with_defaults() {
        let conf = parse_config(
            "
root: !sandbox
  name: shell_root
",
        )
        .unwrap();

        assert_eq!(
            conf,
            EmulatorConf {
                user: None,
                hostname: None,
                startup_script: None,
                root: RootConf::Sandbox(SandboxConf {
                    start_point: String::new(),
                    name: String::from("shell_root"),
                    links_allowed: false,
                    content: Vec::new(),
                }),
            }
        );
    }

    #[test]
    fn parser_should_accept_yaml_sandbox_with_content() {
        let conf = parse_config(
            r#"
user: student
hostname: emulator
root: !sandbox
  start_point: "."
  name: shell_root
  content:
    - !directory
        name: docs
        content:
          - !file
              name: notes.txt
              content: !inline_text "line1\nline2\n"
    - !file
        name: empty.txt
        content: !empty
    - !clone_directory
        name: copy
        source: docs
"#,
        )
        .unwrap();

        let expected_content = vec![
            ConfigEntry::Directory(DirectoryConf {
                name: String::from("docs"),
                content: vec![ConfigEntry::File(FileConf {
                    name: String::from("notes.txt"),
                    content: FileContent::InlineText(String::from("line1\nline2\n")),
                })],
            }),
            ConfigEntry::File(FileConf {
                name: String::from("empty.txt"),
                content: FileContent::Empty,
            }),
            ConfigEntry::CloneDirectory(CloneDirectoryConf {
                name: String::from("copy"),
                source: String::from("docs"),
            }),
        ];

        assert_eq!(conf.user.as_deref(), Some("student"));
        assert_eq!(conf.hostname.as_deref(), Some("emulator"));
        match conf.root {
            RootConf::Sandbox(sandbox) => {
                assert_eq!(sandbox.start_point, ".");
                assert_eq!(sandbox.content, expected_content);
            }
            RootConf::Existing(_) => panic!("sandbox root expected"),
        }
    }

    #[test]
    fn parser_should_accept_json_config() {
        let conf = parse_config(
            "{\"startup_script\":\"init.sh\",\"root\":{\"sandbox\":{\"name\":\"root\",\"content\":[{\"file\":{\"name\":\"test.txt\",\"content\":{\"inline_bytes\":[116,101,115,116]}}}]}}}",
        )
        .unwrap();

        assert_eq!(conf.startup_script.as_deref(), Some("init.sh"));
        let RootConf::Sandbox(sandbox) = conf.root else {
            panic!("sandbox root expected");
        };
        assert_eq!(
            sandbox.content,
            vec![ConfigEntry::File(FileConf {
                name: String::from("test.txt"),
                content: FileContent::InlineBytes(String::from("test").into_bytes()),
            })]
        );
    }

    #[test]
    fn parser_should_report_yaml_errors() {
        let res = parse_config("root: !unknown_root_kind x");
        assert!(matches!(res, Err(ShellError::ParseYaml(_))));
    }

    #[test]
    fn serialization_for_existing_root_skips_missing_fields() {
        let conf = EmulatorConf {
            user: None,
            hostname: None,
            startup_script: None,
            root: RootConf::Existing(String::from("/tmp")),
        };

        assert_eq!(
            String::from("root: !existing /tmp\n"),
            serde_yaml::to_string(&conf).unwrap(),
        );
        assert_eq!(
            String::from("{\"root\":{\"existing\":\"/tmp\"}}"),
            serde_json::to_string(&conf).unwrap(),
        );
    }
}
