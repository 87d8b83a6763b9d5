//! Translate command - convert source text between languages.

use crate::config::RewordConfig;
use crate::error::Error;
use crate::pipeline::Pipeline;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Translate command arguments
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Input source file, use - for stdin
    pub input: PathBuf,

    /// Source language (detected from the file extension if omitted)
    #[arg(short, long)]
    pub from: Option<SourceLanguage>,

    /// Target language
    #[arg(short, long)]
    pub to: Option<TargetLanguage>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to emit
    #[arg(long, value_enum, default_value_t = Emit::Text)]
    pub emit: Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceLanguage {
    /// Java
    Java,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetLanguage {
    /// Tuff
    Tuff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Target-language source
    Text,
    /// The rewritten tree as JSON
    Tree,
}

impl SourceLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Java => "java",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceLanguage {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Self::Java),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Tuff => "tuff",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tuff" => Ok(Self::Tuff),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

/// Pick the source language: flag, then config, then file extension.
fn source_language(args: &TranslateArgs, config: &RewordConfig) -> Result<SourceLanguage, Error> {
    if let Some(lang) = args.from {
        return Ok(lang);
    }
    if let Some(lang) = &config.translate.from {
        return lang.parse();
    }
    let is_stdin = args.input.as_os_str() == "-";
    let extension = args.input.extension().and_then(|e| e.to_str());
    match extension.and_then(reword_syntax::reader_for_extension) {
        Some(reader) if !is_stdin => reader.language().parse(),
        _ => Err(Error::UndetectedLanguage(
            args.input.display().to_string(),
        )),
    }
}

fn target_language(args: &TranslateArgs, config: &RewordConfig) -> Result<TargetLanguage, Error> {
    match (args.to, &config.translate.to) {
        (Some(lang), _) => Ok(lang),
        (None, Some(lang)) => lang.parse(),
        (None, None) => Ok(TargetLanguage::Tuff),
    }
}

/// Translate `source` and render it in the requested form.
pub fn translate(
    source: &str,
    from: SourceLanguage,
    to: TargetLanguage,
    emit: Emit,
) -> Result<String, Error> {
    let pipeline = Pipeline::for_languages(from.as_str(), to.as_str())?;
    match emit {
        Emit::Text => Ok(pipeline.run(source)?.output),
        Emit::Tree => {
            let lowered = pipeline.lower(source)?;
            let mut json = serde_json::to_string_pretty(&lowered.tree)
                .map_err(|e| Error::Ast(e.to_string()))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Run the translate command
pub fn run(args: TranslateArgs, config: &RewordConfig) -> Result<(), Error> {
    let from = source_language(&args, config)?;
    let to = target_language(&args, config)?;
    let content = super::read_input(&args.input)?;

    let output = translate(&content, from, to, args.emit)?;

    match args.output {
        Some(path) => {
            super::write_output(&path, &output)?;
            eprintln!(
                "Translated {} -> {} ({})",
                args.input.display(),
                path.display(),
                to
            );
        }
        None => print!("{output}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;

    fn args(input: &str) -> TranslateArgs {
        TranslateArgs {
            input: PathBuf::from(input),
            from: None,
            to: None,
            output: None,
            emit: Emit::Text,
        }
    }

    #[test]
    fn test_language_from_extension() {
        let config = RewordConfig::default();
        assert_eq!(
            source_language(&args("src/Foo.java"), &config).unwrap(),
            SourceLanguage::Java
        );
        assert!(matches!(
            source_language(&args("Foo.kt"), &config),
            Err(Error::UndetectedLanguage(_))
        ));
        assert!(source_language(&args("-"), &config).is_err());
    }

    #[test]
    fn test_flag_beats_config() {
        let config = RewordConfig {
            translate: TranslateConfig {
                from: Some("cobol".into()),
                to: Some("tuff".into()),
            },
            ..Default::default()
        };
        let mut explicit = args("-");
        explicit.from = Some(SourceLanguage::Java);
        assert_eq!(source_language(&explicit, &config).unwrap(), SourceLanguage::Java);
        assert!(matches!(
            source_language(&args("-"), &config),
            Err(Error::UnknownLanguage(lang)) if lang == "cobol"
        ));
        assert_eq!(target_language(&args("-"), &config).unwrap(), TargetLanguage::Tuff);
    }

    #[test]
    fn test_translate_text_and_tree() {
        let source = "import a.B;\nclass C {}";
        let text = translate(source, SourceLanguage::Java, TargetLanguage::Tuff, Emit::Text).unwrap();
        assert_eq!(text, "extern let { B } = a;\nout object C {}\n");

        let tree = translate(source, SourceLanguage::Java, TargetLanguage::Tuff, Emit::Tree).unwrap();
        let value: serde_json::Value = serde_json::from_str(&tree).unwrap();
        assert_eq!(value["kind"], "root");
        assert_eq!(value["lists"]["children"][0]["kind"], "extern let");
        assert_eq!(value["lists"]["children"][1]["kind"], "object");
    }
}
