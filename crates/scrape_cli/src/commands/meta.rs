use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use scrape::ReportError;

use crate::Cli;

/// Write the completion script for `shell` to `out`.
fn write_completions(shell: clap_complete::Shell, out: &mut impl Write) {
    clap_complete::generate(shell, &mut Cli::command(), "scrape", out);
}

/// Handle `completions <shell>`.
pub(crate) fn handle_completions(shell: clap_complete::Shell) -> Result<(), ReportError> {
    let mut stdout = std::io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Handle `man`: the top-level page on stdout, or one page per command
/// under `dir`.
pub(crate) fn handle_man(dir: Option<&Path>) -> Result<(), ReportError> {
    let Some(dir) = dir else {
        let mut stdout = std::io::stdout().lock();
        clap_mangen::Man::new(Cli::command()).render(&mut stdout)?;
        return Ok(());
    };

    std::fs::create_dir_all(dir)?;
    clap_mangen::generate_to(Cli::command(), dir)?;
    tracing::info!(dir = %dir.display(), "Wrote man pages");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zsh_completions_name_every_report_command() {
        let mut buf = Vec::new();
        write_completions(clap_complete::Shell::Zsh, &mut buf);
        let script = String::from_utf8(buf).unwrap();

        for command in ["commits", "openprs", "closedprs", "top100", "apirates"] {
            assert!(script.contains(command), "missing {command}");
        }
    }

    #[test]
    fn man_pages_cover_subcommands() {
        let dir = std::env::temp_dir().join(format!("scrape-man-{}", std::process::id()));

        handle_man(Some(&dir)).unwrap();

        let pages: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        // Top-level page plus one per visible subcommand
        assert!(pages.len() > 5, "{pages:?}");
        assert!(pages.iter().any(|p| p.contains("top100")), "{pages:?}");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn man_directory_that_is_a_file_is_an_io_error() {
        let file = std::env::temp_dir().join(format!("scrape-man-file-{}", std::process::id()));
        std::fs::write(&file, b"").unwrap();

        let err = handle_man(Some(&file)).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));

        std::fs::remove_file(&file).unwrap();
    }
}
