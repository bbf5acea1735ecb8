//! Command line scanning

use crate::error::ExtractorError;
use regex::Regex;
use std::collections::HashSet;

/// Matches trimmed lines that begin with a whitelisted token
#[derive(Debug, Clone)]
pub(crate) struct CommandMatcher {
    pattern: Regex,
}

impl CommandMatcher {
    /// Compile a matcher for the given tokens
    pub fn new(tokens: &[String]) -> Result<Self, ExtractorError> {
        let alternatives: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
        let pattern = Regex::new(&format!(r"^(?:{})(?:\s|$)", alternatives.join("|")))?;
        Ok(Self { pattern })
    }

    /// Whether a single, already trimmed line is a command
    pub fn is_command(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Collect command lines in first-occurrence order, without repeats.
    ///
    /// Fenced code blocks get no special treatment: a matching line counts
    /// wherever it appears.
    pub fn scan(&self, markdown: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        for line in markdown.lines() {
            let line = line.trim();
            if self.is_command(line) && seen.insert(line) {
                commands.push(line.to_string());
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;

    fn matcher() -> CommandMatcher {
        CommandMatcher::new(&ExtractorConfig::default().command_tokens).unwrap()
    }

    #[test]
    fn test_whitelist_filters_lines() {
        let md = "foo bar\nsystemctl stop x\nps aux";
        assert_eq!(matcher().scan(md), vec!["systemctl stop x", "ps aux"]);
    }

    #[test]
    fn test_token_must_be_whole_word() {
        let m = matcher();
        assert!(!m.is_command("psql -U admin"));
        assert!(!m.is_command("killer feature"));
        assert!(m.is_command("kill -9 1234"));
        assert!(m.is_command("kill\t-9 1234"));
    }

    #[test]
    fn test_bare_token_matches() {
        assert_eq!(matcher().scan("Run:\n\n    stopaiw\n"), vec!["stopaiw"]);
    }

    #[test]
    fn test_lines_are_trimmed_and_deduplicated() {
        let md = "  sudo systemctl restart aiw  \nsudo systemctl restart aiw\n";
        assert_eq!(matcher().scan(md), vec!["sudo systemctl restart aiw"]);
    }

    #[test]
    fn test_fenced_block_lines_included() {
        let md = "Steps:\n```bash\nstartaiw\n```\nThen check with ps -ef";
        assert_eq!(matcher().scan(md), vec!["startaiw"]);
    }

    #[test]
    fn test_prose_with_command_mid_line_ignored() {
        assert!(matcher().scan("You can run `stopaiw` to stop it.").is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matcher().is_command("Shutdown the server"));
    }

    #[test]
    fn test_tokens_are_escaped() {
        let m = CommandMatcher::new(&["a.b".to_string()]).unwrap();
        assert!(m.is_command("a.b run"));
        assert!(!m.is_command("axb run"));
    }

    #[test]
    fn test_empty_input() {
        assert!(matcher().scan("").is_empty());
    }
}
