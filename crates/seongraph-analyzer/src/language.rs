//! Supported languages and their external collaborators

use std::path::Path;

/// Languages the analyzer can walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Java, Language::Cpp];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Cpp => "Cpp",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::Cpp => &["cpp", "h", "hpp"],
        }
    }

    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Language::ALL
            .into_iter()
            .find(|language| language.extensions().contains(&extension))
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        }
    }

    /// Default language-server command, overridable from the CLI.
    pub fn server_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Language::Java => ("jdtls", &[]),
            Language::Cpp => ("clangd", &["--background-index"]),
        }
    }
}
