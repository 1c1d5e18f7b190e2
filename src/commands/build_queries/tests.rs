use std::fs;

use super::*;
use crate::util::read_jsonl;

fn synthesizer() -> QuerySynthesizer {
    QuerySynthesizer::new().expect("synthesizer regexes should compile")
}

fn rules() -> RuleTable {
    RuleTable::compile().expect("rule table should compile")
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, contents).expect("write fixture file");
}

fn canonical_tempdir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = fs::canonicalize(dir.path()).expect("canonical tempdir");
    (dir, root)
}

#[test]
fn identifier_tokens_split_camel_case_and_acronyms() {
    let synth = synthesizer();
    assert_eq!(
        synth.identifier_tokens("getUserByEmail"),
        vec!["get", "user", "by", "email"]
    );
    assert_eq!(
        synth.identifier_tokens("HTTPServerConfig"),
        vec!["http", "server", "config"]
    );
    assert_eq!(
        synth.identifier_tokens("parse_http-header"),
        vec!["parse", "http", "header"]
    );
}

#[test]
fn identifier_phrase_requires_two_tokens() {
    let synth = synthesizer();
    assert_eq!(synth.identifier_phrase("main"), None);
    assert_eq!(synth.identifier_phrase("__init__"), None);
    assert_eq!(
        synth.identifier_phrase("loadConfigFile").as_deref(),
        Some("load config file")
    );
}

#[test]
fn sanitize_comment_removes_symbol_case_insensitively() {
    let synth = synthesizer();
    assert_eq!(
        synth.sanitize_comment("Fetch user by email", "fetchUserByEmail"),
        "Fetch user by email"
    );
    assert_eq!(
        synth.sanitize_comment("FETCHUSERBYEMAIL   looks up\ta user", "fetchUserByEmail"),
        "looks up a user"
    );
    assert_eq!(
        synth.sanitize_comment("calls a.b(c) twice", "a.b(c)"),
        "calls twice"
    );
}

#[test]
fn sanitize_comment_joins_word_around_embedded_symbol() {
    let synth = synthesizer();
    assert_eq!(synth.sanitize_comment("wraps xfooy here", "foo"), "wraps xy here");
    assert_eq!(synth.sanitize_comment("FOO wraps Foo", "foo"), "wraps");
}

#[test]
fn symbols_mode_prefers_comment_then_identifier_phrase() {
    let synth = synthesizer();
    assert_eq!(
        synth
            .synthesize(
                ExtractionMode::Symbols,
                "computeInvoiceTotal",
                Some("Sums line items and applies tax.")
            )
            .as_deref(),
        Some("Where is the code that sums line items and applies tax?")
    );
    assert_eq!(
        synth
            .synthesize(ExtractionMode::Symbols, "parseArgs", Some("parseArgs"))
            .as_deref(),
        Some("Where is the code that parse args?")
    );
    assert_eq!(
        synth.synthesize(ExtractionMode::Symbols, "main", None),
        None
    );
}

#[test]
fn symbols_mode_keeps_leading_acronym_capitalized() {
    let synth = synthesizer();
    assert_eq!(
        synth
            .synthesize(ExtractionMode::Symbols, "serve", Some("HTTP handler for uploads"))
            .as_deref(),
        Some("Where is the code that HTTP handler for uploads?")
    );
}

#[test]
fn symbols_mode_drops_only_trailing_sentence_punctuation() {
    let synth = synthesizer();
    assert_eq!(
        synth
            .synthesize(ExtractionMode::Symbols, "load", Some("Reads config: env, then file:"))
            .as_deref(),
        Some("Where is the code that reads config: env, then file?")
    );
    assert_eq!(
        synth
            .synthesize(ExtractionMode::Symbols, "stop", Some("Halts v1.2 workers..."))
            .as_deref(),
        Some("Where is the code that halts v1.2 workers?")
    );
}

#[test]
fn semantic_mode_ignores_comments() {
    let synth = synthesizer();
    assert_eq!(
        synth
            .synthesize(
                ExtractionMode::Semantic,
                "getUserByEmail",
                Some("Looks up a user record")
            )
            .as_deref(),
        Some("code for get user by email")
    );
    assert_eq!(
        synth.synthesize(ExtractionMode::Semantic, "run", Some("Runs everything we have")),
        None
    );
}

#[test]
fn rule_table_captures_definitions_per_language() {
    let table = rules();
    assert_eq!(
        table.match_symbol(Language::Python, "    def load_user(self, id):"),
        Some("load_user")
    );
    assert_eq!(
        table.match_symbol(Language::Go, "func (s *Server) HandleConn(c net.Conn) {"),
        Some("HandleConn")
    );
    assert_eq!(
        table.match_symbol(Language::TypeScript, "interface UserRecord {"),
        Some("UserRecord")
    );
    assert_eq!(
        table.match_symbol(Language::Ruby, "  def valid_for?(user)"),
        Some("valid_for")
    );
    assert_eq!(
        table.match_symbol(Language::C, "static int parse_header(char *buf, size_t len) {"),
        Some("parse_header")
    );
    assert_eq!(
        table.match_symbol(Language::ObjC, "- (void)viewDidLoad {"),
        Some("viewDidLoad")
    );
    assert_eq!(table.match_symbol(Language::Rust, "pub fn hidden() {}"), None);
    assert_eq!(table.match_symbol(Language::Python, "x = compute()"), None);
}

#[test]
fn rule_table_uses_first_matching_rule() {
    let table = rules();
    assert_eq!(
        table.match_symbol(
            Language::JavaScript,
            "export const fetchAll = async (opts) => {"
        ),
        Some("fetchAll")
    );
    assert_eq!(
        table.match_symbol(Language::Kotlin, "data class Invoice(val id: Int)"),
        Some("Invoice")
    );
}

#[test]
fn leading_comment_collects_contiguous_line_run() {
    let lines = vec![
        "import os",
        "",
        "# Reads the settings file",
        "# and merges environment overrides",
        "",
        "def load_settings():",
    ];
    assert_eq!(
        extract_leading_comment(&lines, 5, "#").as_deref(),
        Some("Reads the settings file and merges environment overrides")
    );
}

#[test]
fn leading_comment_stops_at_blank_after_collecting() {
    let lines = vec![
        "// Unrelated header comment goes here",
        "",
        "// Parses the request body",
        "fn parse() {",
    ];
    assert_eq!(
        extract_leading_comment(&lines, 3, "//").as_deref(),
        Some("Parses the request body")
    );
}

#[test]
fn leading_comment_absent_when_code_precedes_definition() {
    let lines = vec!["// Describes the constant below", "const X = 1;", "fn run() {"];
    assert_eq!(extract_leading_comment(&lines, 2, "//"), None);
    assert_eq!(extract_leading_comment(&lines, 0, "//"), None);
}

#[test]
fn leading_comment_discards_short_comments() {
    let lines = vec!["// helper fn", "fn help() {"];
    assert_eq!(extract_leading_comment(&lines, 1, "//"), None);
}

#[test]
fn leading_comment_looks_back_at_most_eight_lines() {
    let mut lines = (0..10)
        .map(|index| format!("// line {index}"))
        .collect::<Vec<String>>();
    lines.push("fn bounded() {".to_string());

    assert_eq!(
        extract_leading_comment(&lines, 10, "//").as_deref(),
        Some("line 2 line 3 line 4 line 5 line 6 line 7 line 8 line 9")
    );
}

#[test]
fn leading_comment_recovers_multiline_block() {
    let lines = vec![
        "/**",
        " * Loads the user profile",
        " * from the cache.",
        " */",
        "public class ProfileLoader {",
    ];
    assert_eq!(
        extract_leading_comment(&lines, 4, "//").as_deref(),
        Some("Loads the user profile from the cache.")
    );
}

#[test]
fn leading_comment_block_wins_over_adjacent_line_run() {
    let lines = vec![
        "/* Block level description here */",
        "// trailing line note",
        "fn compute() {",
    ];
    assert_eq!(
        extract_leading_comment(&lines, 2, "//").as_deref(),
        Some("Block level description here")
    );
}

#[test]
fn comment_blocks_cover_runs_and_block_comments_anywhere() {
    let lines = vec![
        "let a = 1; /* inline block note */",
        "// first run line",
        "/// second run line",
        "let b = 2;",
        "/*",
        " * Multi line block",
        " * keeps going",
        " */",
    ];

    let blocks = extract_comment_blocks(&lines, "//");
    assert_eq!(
        blocks,
        vec![
            (1, "inline block note".to_string()),
            (2, "first run line second run line".to_string()),
            (5, "Multi line block keeps going".to_string()),
        ]
    );
}

#[test]
fn assembler_prefers_semantic_items_and_assigns_sequential_ids() {
    let make = |symbol: &str, semantic: Option<&str>| ExtractedItem {
        file: "/repo/a.rs".to_string(),
        line: 1,
        symbol: symbol.to_string(),
        language: Language::Rust,
        query_keyword: symbol.to_string(),
        query_semantic: semantic.map(ToOwned::to_owned),
        comment: None,
    };
    let items = vec![
        make("alpha", None),
        make("betaGamma", Some("code for beta gamma")),
        make("", None),
        make("delta", None),
        make("epsilonZeta", Some("code for epsilon zeta")),
    ];

    let assembled = assemble_query_set(items.clone(), 3);
    let symbols = assembled
        .iter()
        .map(|item| (item.id.as_str(), item.symbol.as_str()))
        .collect::<Vec<(&str, &str)>>();
    assert_eq!(
        symbols,
        vec![
            ("q0000", "betaGamma"),
            ("q0001", "epsilonZeta"),
            ("q0002", "alpha")
        ]
    );

    let capped = assemble_query_set(items, 1);
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].symbol, "betaGamma");
}

#[test]
fn build_query_set_synthesizes_invoice_query_end_to_end() {
    let (_dir, root) = canonical_tempdir();
    write_file(
        &root,
        "src/billing.ts",
        "import { LineItem } from './types';\n\n// Sums line items and applies tax\nexport function computeInvoiceTotal(items: LineItem[]): number {\n  return 0;\n}\n",
    );
    write_file(&root, "src/main.py", "def main():\n    pass\n");
    write_file(
        &root,
        "node_modules/dep/index.js",
        "// Vendored helper that should never be scanned\nfunction vendoredHelper() {}\n",
    );
    write_file(&root, "README.md", "# Not source\n");

    let items = build_query_set(&root, 10, ExtractionMode::Symbols, &rules(), &synthesizer())
        .expect("query set should build");

    assert_eq!(items.len(), 2);
    let invoice = &items[0];
    assert_eq!(invoice.id, "q0000");
    assert_eq!(invoice.symbol, "computeInvoiceTotal");
    assert_eq!(invoice.query_keyword, "computeInvoiceTotal");
    assert_eq!(invoice.language, Language::TypeScript);
    assert_eq!(invoice.line, 4);
    assert_eq!(
        invoice.file,
        root.join("src/billing.ts").display().to_string()
    );
    assert_eq!(
        invoice.query_semantic.as_deref(),
        Some("Where is the code that sums line items and applies tax?")
    );
    assert_eq!(
        invoice.comment.as_deref(),
        Some("Sums line items and applies tax")
    );

    let main = &items[1];
    assert_eq!(main.id, "q0001");
    assert_eq!(main.symbol, "main");
    assert_eq!(main.query_semantic, None);
    assert!(items.iter().all(|item| !item.file.contains("node_modules")));
}

#[test]
fn build_query_set_is_deterministic_and_round_trips_through_jsonl() {
    let (_dir, root) = canonical_tempdir();
    write_file(
        &root,
        "pkg/server.go",
        "package pkg\n\n// ServeHTTP routes incoming café requests\nfunc (s *Server) ServeHTTP(w http.ResponseWriter, r *http.Request) {\n}\n\ntype Server struct {\n}\n",
    );
    write_file(
        &root,
        "lib/store.rb",
        "# Persists the record to disk\ndef save_record!\nend\n",
    );

    let first = build_query_set(&root, 5, ExtractionMode::Symbols, &rules(), &synthesizer())
        .expect("first build");
    let second = build_query_set(&root, 5, ExtractionMode::Symbols, &rules(), &synthesizer())
        .expect("second build");
    assert_eq!(first, second);

    let out = root.join("out/queries.jsonl");
    write_jsonl_ascii(&out, &first).expect("write query set");
    let raw = fs::read_to_string(&out).expect("read query set");
    assert!(raw.is_ascii());
    assert_eq!(raw.lines().count(), first.len());

    let reread: Vec<QueryItem> = read_jsonl(&out).expect("reread query set");
    assert_eq!(reread, first);
}

#[test]
fn build_query_set_comments_mode_emits_long_comments_only() {
    let (_dir, root) = canonical_tempdir();
    write_file(
        &root,
        "src/cache.rs",
        "// short note\nfn a() {}\n\n/* Evicts least recently used entries when full */\nfn b() {}\n",
    );

    let items = build_query_set(&root, 10, ExtractionMode::Comments, &rules(), &synthesizer())
        .expect("comments mode should find the block");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].line, 4);
    assert_eq!(items[0].symbol, "");
    assert_eq!(items[0].query_keyword, "");
    assert_eq!(
        items[0].query_semantic.as_deref(),
        Some("Evicts least recently used entries when full")
    );
}

#[test]
fn build_query_set_fails_when_nothing_is_extracted() {
    let (_dir, root) = canonical_tempdir();
    write_file(&root, "notes.txt", "def not_code():\n");

    let error = build_query_set(&root, 10, ExtractionMode::Symbols, &rules(), &synthesizer())
        .expect_err("empty scan should abort");
    assert!(
        error.to_string().contains("no items extracted"),
        "unexpected error: {error}"
    );
}
