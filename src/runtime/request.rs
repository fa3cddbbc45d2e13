use std::fmt;
use std::path::{Path, PathBuf};

use super::resolver;
use crate::constants::{BATCH_FILE_EXTENSION, PRINT_TARGET};
use crate::domain::Mode;
use crate::utils::PokedexError;

/// Where the final results go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output
    Print,
    /// A `.txt` file, overwritten with the results
    File(PathBuf),
    /// Anything else; reported and replaced by standard output
    Unsupported(String),
}

impl OutputTarget {
    pub fn parse(raw: &str) -> Self {
        if raw == PRINT_TARGET {
            return OutputTarget::Print;
        }

        let is_txt = Path::new(raw)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(BATCH_FILE_EXTENSION));

        if is_txt {
            OutputTarget::File(PathBuf::from(raw))
        } else {
            OutputTarget::Unsupported(raw.to_string())
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Print => f.write_str(PRINT_TARGET),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// One invocation's execution plan and its accumulated output
#[derive(Debug)]
pub struct Request {
    mode: Mode,
    pub input: String,
    pub expanded: bool,
    pub output: OutputTarget,
    pub fetch_sprites: bool,
    pub queries: Vec<String>,
    pub results: String,
}

impl Request {
    /// Build a request. `expanded` is dropped for modes that cannot expand.
    pub fn new(mode: Mode, input: impl Into<String>, expanded: bool, output: &str) -> Self {
        Self {
            mode,
            input: input.into(),
            expanded: expanded && mode.supports_expanded(),
            output: OutputTarget::parse(output),
            fetch_sprites: false,
            queries: Vec::new(),
            results: String::new(),
        }
    }

    /// Ask the pipeline to also fetch sprite bytes for Pokemon results
    pub fn with_sprites(mut self, fetch_sprites: bool) -> Self {
        self.fetch_sprites = fetch_sprites && self.mode == Mode::Pokemon;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fill `queries` from the input; nothing is looked up on failure
    pub fn resolve(&mut self) -> Result<(), PokedexError> {
        self.queries = resolver::resolve(&self.input)?;
        Ok(())
    }

    /// Append one rendered block, separated from the previous by a blank line
    pub fn push_result(&mut self, block: &str) {
        if !self.results.is_empty() {
            self.results.push('\n');
        }
        self.results.push_str(block);
        self.results.push('\n');
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request: Mode: {}, Input: {}, Expanded: {}, Output: {}",
            self.mode, self.input, self.expanded, self.output
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_parse() {
        assert_eq!(OutputTarget::parse("print"), OutputTarget::Print);
        assert_eq!(
            OutputTarget::parse("results.txt"),
            OutputTarget::File(PathBuf::from("results.txt"))
        );
        assert_eq!(
            OutputTarget::parse("results.csv"),
            OutputTarget::Unsupported("results.csv".into())
        );
        assert_eq!(
            OutputTarget::parse("results"),
            OutputTarget::Unsupported("results".into())
        );
    }

    #[test]
    fn test_expanded_only_kept_for_pokemon() {
        assert!(Request::new(Mode::Pokemon, "pikachu", true, "print").expanded);
        assert!(!Request::new(Mode::Ability, "static", true, "print").expanded);
        assert!(!Request::new(Mode::Move, "surf", true, "print").expanded);
    }

    #[test]
    fn test_sprites_only_for_pokemon() {
        assert!(Request::new(Mode::Pokemon, "pikachu", false, "print").with_sprites(true).fetch_sprites);
        assert!(!Request::new(Mode::Move, "surf", false, "print").with_sprites(true).fetch_sprites);
    }

    #[test]
    fn test_resolve_fills_queries() {
        let mut request = Request::new(Mode::Pokemon, "pikachu", false, "print");
        request.resolve().unwrap();
        assert_eq!(request.queries, vec!["pikachu".to_string()]);
    }

    #[test]
    fn test_failed_resolve_leaves_queries_empty() {
        let mut request = Request::new(Mode::Pokemon, "pokemon.csv", false, "print");
        assert!(request.resolve().is_err());
        assert!(request.queries.is_empty());
    }

    #[test]
    fn test_push_result_separates_blocks() {
        let mut request = Request::new(Mode::Move, "surf", false, "print");
        request.push_result("first");
        request.push_result("second");
        assert_eq!(request.results, "first\n\nsecond\n");
    }

    #[test]
    fn test_display() {
        let request = Request::new(Mode::Pokemon, "team.txt", true, "out.txt");
        assert_eq!(
            request.to_string(),
            "Request: Mode: pokemon, Input: team.txt, Expanded: true, Output: out.txt"
        );
    }
}
