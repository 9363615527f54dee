use anyhow::Result;
use clap::{Parser, Subcommand};
use newsfind_core::corpus::{load_corpus, save_corpus};
use newsfind_core::tagging::auto_tag_corpus;
use newsfind_core::{search, CorpusIndex, RankingModel, SearchOptions, SearchOutcome, Thesaurus};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "newsfind")]
#[command(about = "Search and prepare a news corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query against a corpus
    Search {
        /// Corpus file or directory (JSON array or JSONL)
        #[arg(long, default_value = "./data/news.sample.json")]
        corpus: PathBuf,
        /// Optional thesaurus JSON replacing the built-in synonyms
        #[arg(long)]
        synonyms: Option<PathBuf>,
        /// Ranking model: tfidf or bm25
        #[arg(long, default_value = "tfidf")]
        model: String,
        /// Multiply scores by title/tags/abstract field boosts
        #[arg(long, default_value_t = false)]
        boosts: bool,
        /// Query text; quote phrases, use AND/OR between terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print corpus statistics
    Stats {
        #[arg(long, default_value = "./data/news.sample.json")]
        corpus: PathBuf,
        /// Number of most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Add keyword-inferred tags to every article
    Tag {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, synonyms, model, boosts, query } => {
            let thesaurus = match synonyms {
                Some(path) => Thesaurus::from_json_file(path)?,
                None => Thesaurus::default(),
            };
            let options = SearchOptions { model: model.parse::<RankingModel>()?, field_boosts: boosts };
            run_search(&corpus, &thesaurus, &query.join(" "), &options)
        }
        Commands::Stats { corpus, top } => print_stats(&corpus, top),
        Commands::Tag { input, output } => tag(&input, &output),
    }
}

fn run_search(corpus: &Path, thesaurus: &Thesaurus, query: &str, options: &SearchOptions) -> Result<()> {
    let index = CorpusIndex::build(load_corpus(corpus)?);
    let outcome = search(&index, thesaurus, query.trim(), options)?;
    tracing::info!(hits = outcome.len(), elapsed_ms = outcome.elapsed_ms, model = %options.model, "query complete");
    render(&mut io::stdout().lock(), query.trim(), &outcome)?;
    Ok(())
}

fn render<W: Write>(out: &mut W, query: &str, outcome: &SearchOutcome<'_>) -> io::Result<()> {
    writeln!(out, "{} results in {:.1} ms for \"{}\"", outcome.len(), outcome.elapsed_ms, query)?;
    if outcome.is_empty() {
        writeln!(out, "No articles found.")?;
        return Ok(());
    }
    for (rank, hit) in outcome.hits.iter().enumerate() {
        let d = hit.document;
        writeln!(out, "{:>3}. {:>9.4}  [{}] {} {}  {}", rank + 1, hit.score, d.id, d.date, d.source, d.title)?;
    }
    Ok(())
}

fn print_stats(corpus: &Path, top: usize) -> Result<()> {
    let index = CorpusIndex::build(load_corpus(corpus)?);
    let mut terms: Vec<(&String, &u32)> = index.document_frequencies().iter().collect();
    // highest df first, alphabetical within a df
    terms.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "documents: {}", index.num_docs())?;
    writeln!(out, "vocabulary: {}", terms.len())?;
    for (term, df) in terms.into_iter().take(top) {
        writeln!(out, "{df:>6}  {term}")?;
    }
    Ok(())
}

fn tag(input: &Path, output: &Path) -> Result<()> {
    let mut docs = load_corpus(input)?;
    let updated = auto_tag_corpus(&mut docs);
    save_corpus(output, &docs)?;
    tracing::info!(output = %output.display(), "tagged corpus written");
    println!("Processed {} articles.", docs.len());
    println!("Updated tags for {} articles.", updated);
    println!("Saved updated dataset to: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsfind_core::Document;

    fn index() -> CorpusIndex {
        CorpusIndex::build(vec![Document {
            id: 5,
            title: "Transit plan adopted".into(),
            summary: "Buses gain lanes".into(),
            tags: vec!["transit".into()],
            date: "2024-02-01".into(),
            source: "Metro".into(),
            full_text: None,
        }])
    }

    #[test]
    fn renders_hits() {
        let idx = index();
        let outcome = search(&idx, &Thesaurus::default(), "transit", &SearchOptions::default()).unwrap();
        let mut buf = Vec::new();
        render(&mut buf, "transit", &outcome).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("1 results in "));
        assert!(text.contains("[5] 2024-02-01 Metro  Transit plan adopted"));
    }

    fn write_corpus(dir: &Path) -> PathBuf {
        let path = dir.join("news.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "title": "Solar farm approved", "abstract": "Panels cover the old quarry.", "tags": []}]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn runs_search_against_corpus_file() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(dir.path());
        let opts = SearchOptions { model: RankingModel::Bm25, field_boosts: true };
        run_search(&corpus, &Thesaurus::default(), "solar", &opts).unwrap();
        assert!(run_search(&corpus, &Thesaurus::default(), "  ", &opts).is_err());
    }

    #[test]
    fn tags_corpus_into_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_corpus(dir.path());
        let output = dir.path().join("tagged/news.json");
        tag(&input, &output).unwrap();
        let docs = load_corpus(&output).unwrap();
        assert!(docs[0].tags.contains(&"climate".to_string()));
        assert_eq!(docs[0].tags.len(), 5);
    }

    #[test]
    fn renders_empty() {
        let idx = index();
        let outcome = search(&idx, &Thesaurus::default(), "climate", &SearchOptions::default()).unwrap();
        let mut buf = Vec::new();
        render(&mut buf, "climate", &outcome).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("No articles found.\n"));
    }
}
