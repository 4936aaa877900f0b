//! prefixr - CSS vendor prefix engine
//!
//! Parses a stylesheet, works out from a browser support matrix which
//! vendor-prefixed forms each property, value and at-rule still needs, adds
//! the missing ones, strips the obsolete ones and prints the result.
//!
//! # Features
//!
//! - Browser requirements such as `last 2 versions`, `> 1%`, `ff >= 20`,
//!   `opera 12.1` or `none`
//! - Property, value and at-rule prefixing, including values inside
//!   `transition` lists
//! - Legacy syntaxes for flexbox (2009, 2012 and final eras), gradients,
//!   border radius corners and IE filters
//! - Removal of prefixed relics no selected browser needs
//! - Readable or compact output, comments kept on request
//! - Parse errors with file, line and column
//!
//! # Basic Usage
//!
//! ```rust
//! use prefixr::{build_plan, resolve_requirements, transform, PrintOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let browsers = resolve_requirements(&["chrome 25"])?;
//!     let plan = build_plan(&browsers);
//!     let css = transform("a { transition: all 1s }", &plan, &PrintOptions::default())?;
//!     assert!(css.contains("-webkit-transition: all 1s"));
//!     Ok(())
//! }
//! ```
//!
//! # Processing Pipeline
//!
//! 1. **Resolve**: requirements become a set of browser versions
//! 2. **Plan**: every feature gets its add and remove prefix lists
//! 3. **Parse**: comment pre-pass, then CSS text to `AstNode`
//! 4. **Add**: keyframes, property and value prefixes on an arena `Tree`
//! 5. **Remove**: prefixed forms nobody needs any more
//! 6. **Print**: compaction back to `AstNode`, then CSS text

pub mod error;
pub mod data;
pub mod browsers;
pub mod requirements;
pub mod value_matcher;
pub mod strategies;
pub mod prefixes;

pub mod ast;
pub mod preprocessor;
pub mod parser;
pub mod printer;
pub mod tree;
pub mod processor;
pub mod inspect;
pub mod cli;

use std::fs;
use std::path::Path;
use std::sync::Arc;

// Re-export commonly used types and functions
pub use error::{PrefixerError, Result};
pub use browsers::{BrowserDatabase, SelectedBrowser, SelectedBrowsers, Version};
pub use requirements::{resolve_requirements, RequirementResolver, DEFAULT_REQUIREMENTS};
pub use prefixes::{FeatureEntry, FeaturePlan, PlanCache, PrefixPlan};
pub use strategies::Strategy;
pub use value_matcher::ValueMatcher;

pub use ast::{AstNode, Position};
pub use parser::{parse, Parser};
pub use printer::{print, PrintOptions, PrintStyle};
pub use tree::{NodeId, Tree};
pub use processor::{ProcessStats, Processor};
pub use inspect::SupportReport;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Options for one transform run
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Output formatting
    pub print: PrintOptions,

    /// Name used in parse errors; `<css input>` when unset
    pub filename: Option<String>,

    /// Log every pipeline phase at debug level
    pub debug_mode: bool,
}

/// Precompute the prefix plan for a set of browsers
pub fn build_plan(selected: &SelectedBrowsers) -> PrefixPlan {
    PrefixPlan::build(selected)
}

/// Transform CSS text with the given plan
pub fn transform(css: &str, plan: &PrefixPlan, print_options: &PrintOptions) -> Result<String> {
    let options = ProcessOptions {
        print: print_options.clone(),
        ..ProcessOptions::default()
    };
    let (output, _stats) = transform_with_options(css, plan, &options)?;
    Ok(output)
}

/// Transform CSS text and report what changed
pub fn transform_with_options(
    css: &str,
    plan: &PrefixPlan,
    options: &ProcessOptions,
) -> Result<(String, ProcessStats)> {
    let filename = options.filename.as_deref();

    if options.debug_mode {
        log::debug!(
            "Processing {} ({} bytes) for {}",
            filename.unwrap_or(parser::DEFAULT_FILENAME),
            css.len(),
            plan.cache_key()
        );
        log::debug!("Phase 1: Parsing...");
    }

    let ast = parse(css, filename)?;

    if options.debug_mode {
        log::debug!("Phase 1 complete. {} declarations", ast.declaration_count());
        log::debug!("Phase 2: Adding and removing prefixes...");
    }

    let mut tree = Tree::from_ast(&ast);
    let stats = Processor::new(plan).process(&mut tree);

    if options.debug_mode {
        log::debug!(
            "Phase 2 complete. +{} -{} declarations, +{} -{} keyframes",
            stats.declarations_added,
            stats.declarations_removed,
            stats.keyframes_added,
            stats.keyframes_removed
        );
        log::debug!("Phase 3: Printing...");
    }

    let output = print(&tree.to_ast(), &options.print);

    if options.debug_mode {
        log::debug!("Phase 3 complete. Output length: {}", output.len());
    }

    Ok((output, stats))
}

/// Which browsers a plan targets and which features it prefixes
pub fn describe_support(plan: &PrefixPlan) -> SupportReport {
    plan.report().clone()
}

/// Process one file into another, creating the output's parent directory
pub fn process_file(
    input: &Path,
    output: &Path,
    plan: &PrefixPlan,
    options: &ProcessOptions,
) -> Result<ProcessStats> {
    let css = fs::read_to_string(input).map_err(|e| PrefixerError::FileNotFound {
        path: format!("{}: {}", input.display(), e),
    })?;

    let mut options = options.clone();
    if options.filename.is_none() {
        options.filename = Some(input.display().to_string());
    }

    let (result, stats) = transform_with_options(&css, plan, &options)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, result)?;

    log::info!("Processed '{}' to '{}'", input.display(), output.display());
    Ok(stats)
}

/// A resolved plan plus output options, ready to process any number of sheets
#[derive(Debug, Clone)]
pub struct Prefixer {
    plan: Arc<PrefixPlan>,
    options: ProcessOptions,
}

impl Prefixer {
    /// Resolve `requirements`; an empty list means the default requirements
    pub fn new<S: AsRef<str>>(requirements: &[S]) -> Result<Self> {
        let selected = resolve_requirements(requirements)?;
        Ok(Self::from_plan(Arc::new(build_plan(&selected))))
    }

    /// Like `new`, but shares plans for equal browser sets through `cache`
    pub fn with_cache<S: AsRef<str>>(requirements: &[S], cache: &PlanCache) -> Result<Self> {
        let selected = resolve_requirements(requirements)?;
        Ok(Self::from_plan(cache.get_or_build(&selected)))
    }

    pub fn from_plan(plan: Arc<PrefixPlan>) -> Self {
        Self {
            plan,
            options: ProcessOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    pub fn plan(&self) -> &PrefixPlan {
        &self.plan
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    pub fn process(&self, css: &str) -> Result<String> {
        let (output, _stats) = self.process_with_stats(css)?;
        Ok(output)
    }

    pub fn process_with_stats(&self, css: &str) -> Result<(String, ProcessStats)> {
        transform_with_options(css, &self.plan, &self.options)
    }

    pub fn process_file(&self, input: &Path, output: &Path) -> Result<ProcessStats> {
        process_file(input, output, &self.plan, &self.options)
    }

    pub fn info(&self) -> SupportReport {
        describe_support(&self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(css: &str, requirements: &[&str]) -> String {
        Prefixer::new(requirements).unwrap().process(css).unwrap()
    }

    #[test]
    fn test_transition_gets_webkit_form_first() {
        assert_eq!(
            run("a { transition: all 1s }", &["chrome 25"]),
            "a {\n  -webkit-transition: all 1s;\n  transition: all 1s;\n}\n"
        );
    }

    #[test]
    fn test_display_flex_eras_in_order() {
        let css = run("a { display: flex }", &["chrome 20"]);
        assert_eq!(
            css,
            "a {\n  display: -webkit-box;\n  display: -webkit-flex;\n  display: flex;\n}\n"
        );
    }

    #[test]
    fn test_order_is_one_based_in_2009_syntax() {
        let css = run("a { order: 2 }", &["chrome 20"]);
        let ordinal = css.find("-webkit-box-ordinal-group: 3").unwrap();
        let final_era = css.find("-webkit-order: 2").unwrap();
        assert!(ordinal < final_era);
        assert!(css.ends_with("  order: 2;\n}\n"));
    }

    #[test]
    fn test_no_browsers_only_strips_relics() {
        let css = "a {\n  -webkit-border-radius: 2px;\n  border-radius: 2px;\n  color: red;\n}\n";
        assert_eq!(
            run(css, &["none"]),
            "a {\n  border-radius: 2px;\n  color: red;\n}\n"
        );

        let modern = "a {\n  border-radius: 2px;\n  display: flex;\n}\n\n@keyframes k {\n  to {\n    top: 0;\n  }\n}\n";
        assert_eq!(run(modern, &["none"]), modern);
    }

    #[test]
    fn test_unterminated_block_is_parse_error() {
        let err = Prefixer::new(&["chrome 25"]).unwrap().process("a {").unwrap_err();
        match err {
            PrefixerError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_gradient_direction_is_translated() {
        let css = run("a { background: linear-gradient(to bottom, red, blue) }", &["chrome 25"]);
        assert_eq!(
            css,
            "a {\n  background: -webkit-linear-gradient(top, red, blue);\n  background: linear-gradient(to bottom, red, blue);\n}\n"
        );
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let prefixer = Prefixer::new(&["chrome 20", "ff 20", "ie 10"]).unwrap();
        let css = "a { display: flex; justify-content: space-between; transition: all 1s }\n\
                   @keyframes spin { to { transform: rotate(1turn) } }";
        let once = prefixer.process(css).unwrap();
        let (twice, stats) = prefixer.process_with_stats(&once).unwrap();
        assert_eq!(once, twice);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_second_run_keeps_transition_lists_single_vendor() {
        let cases: [(&[&str], &str); 2] = [
            (&["chrome 25", "opera 12"], "a { transition: transform 1s, filter 1s }"),
            (
                &["ff 3.6", "chrome 4", "ie 9"],
                "a { transition: transform 1s, border-top-left-radius 2s }",
            ),
        ];
        for (requirements, css) in cases {
            let prefixer = Prefixer::new(requirements).unwrap();
            let once = prefixer.process(css).unwrap();
            let (twice, stats) = prefixer.process_with_stats(&once).unwrap();
            assert_eq!(once, twice, "browsers {:?}", requirements);
            assert!(stats.is_empty());
            assert!(!twice.contains("-o-transform 1s, -webkit-"));
            assert!(!twice.contains("-ms-transform 1s, -webkit-"));
            assert!(!twice.contains("-ms-transform 1s, -moz-"));
        }
    }

    #[test]
    fn test_existing_pair_is_not_duplicated() {
        let prefixer = Prefixer::new(&["chrome 25"]).unwrap();
        let (css, stats) = prefixer
            .process_with_stats("a { -webkit-transition: all 1s; transition: all 1s }")
            .unwrap();
        assert_eq!(css.matches("-webkit-transition").count(), 1);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_removal_drops_whole_declaration() {
        let css = run(
            "a { background: -moz-linear-gradient(top, red, blue), url(a.png); color: red }",
            &["chrome 30"],
        );
        assert_eq!(css, "a {\n  color: red;\n}\n");
    }

    #[test]
    fn test_compact_output_and_filename() {
        let plan = build_plan(&resolve_requirements(&["chrome 25"]).unwrap());
        let css = transform("a { transition: all 1s }", &plan, &PrintOptions::compact()).unwrap();
        assert_eq!(css, "a{-webkit-transition:all 1s;transition:all 1s}");

        let options = ProcessOptions {
            filename: Some("site.css".to_string()),
            ..ProcessOptions::default()
        };
        let err = transform_with_options("a { color }", &plan, &options).unwrap_err();
        assert!(err.to_string().starts_with("site.css:1:"));
    }

    #[test]
    fn test_cached_prefixers_share_plans() {
        let cache = PlanCache::new();
        let first = Prefixer::with_cache(&["chrome 25"], &cache).unwrap();
        let second = Prefixer::with_cache(&["chrome 25"], &cache).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(first.plan().cache_key(), second.plan().cache_key());
    }

    #[test]
    fn test_info_describes_plan() {
        let report = Prefixer::new(&["chrome 25"]).unwrap().info();
        assert_eq!(report.browsers[0].name, "chrome");
        assert!(report.properties.iter().any(|feature| feature.name == "transition"));
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.css");
        let output = dir.path().join("out").join("in.css");
        fs::write(&input, "a { transition: all 1s }").unwrap();

        let prefixer = Prefixer::new(&["chrome 25"]).unwrap();
        let stats = prefixer.process_file(&input, &output).unwrap();
        assert_eq!(stats.declarations_added, 1);
        assert!(fs::read_to_string(&output).unwrap().contains("-webkit-transition: all 1s;"));

        let missing = prefixer.process_file(&dir.path().join("missing.css"), &output);
        assert!(matches!(missing, Err(PrefixerError::FileNotFound { .. })));
    }

    #[test]
    fn test_process_options_default() {
        let options = ProcessOptions::default();
        assert!(!options.debug_mode);
        assert!(options.filename.is_none());
        assert_eq!(options.print, PrintOptions::default());
    }
}
