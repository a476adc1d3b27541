use std::fs;

use shell_emulator::{ShellEmulator, ShellError};

#[test]
fn seeded_link_is_listed_and_readable() -> Result<(), ShellError> {
    let start_point = tempfile::tempdir()?;
    let target = start_point.path().join("original.txt");
    fs::write(&target, "line1\nline2\nline3\n")?;

    let config = format!(
        "root: !sandbox\n  start_point: {}\n  name: link_creation\n  links_allowed: true\n  content:\n    - !link\n        name: file_link.txt\n        target: {}\n",
        start_point.path().display(),
        target.display()
    );
    let shell = ShellEmulator::from_config_str(&config)?;

    assert!(shell.ls()?.lines().any(|name| name == "file_link.txt"));
    assert_eq!(shell.tac("file_link.txt")?, "line3\nline2\nline1\n");
    Ok(())
}
