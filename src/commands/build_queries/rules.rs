use super::*;

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// Definition-site patterns per language, in priority order. Each entry is
/// a line-anchored template (`{ident}` expands to the identifier capture)
/// and the capture group holding the symbol name.
const LANGUAGE_RULES: &[(Language, &[(&str, usize)])] = &[
    (
        Language::Python,
        &[
            (r"^\s*def\s+({ident})\s*\(", 1),
            (r"^\s*class\s+({ident})\b", 1),
        ],
    ),
    (
        Language::JavaScript,
        &[
            (r"^\s*(?:export\s+)?(?:async\s+)?function\s+({ident})\s*\(", 1),
            (r"^\s*(?:export\s+)?class\s+({ident})\b", 1),
            (r"^\s*(?:export\s+)?const\s+({ident})\s*=\s*(?:async\s+)?\(", 1),
            (
                r"^\s*(?:export\s+)?const\s+({ident})\s*=\s*(?:async\s+)?\([^)]*\)\s*=>",
                1,
            ),
        ],
    ),
    (
        Language::TypeScript,
        &[
            (r"^\s*(?:export\s+)?(?:async\s+)?function\s+({ident})\s*\(", 1),
            (r"^\s*(?:export\s+)?class\s+({ident})\b", 1),
            (r"^\s*(?:export\s+)?const\s+({ident})\s*=\s*(?:async\s+)?\(", 1),
            (
                r"^\s*(?:export\s+)?const\s+({ident})\s*=\s*(?:async\s+)?\([^)]*\)\s*=>",
                1,
            ),
            (r"^\s*interface\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Go,
        &[
            (r"^\s*func\s+(?:\([^)]*\)\s*)?({ident})\s*\(", 1),
            (r"^\s*type\s+({ident})\s+struct\b", 1),
            (r"^\s*type\s+({ident})\s+interface\b", 1),
        ],
    ),
    (
        Language::Rust,
        &[
            (r"^\s*fn\s+({ident})\s*\(", 1),
            (r"^\s*struct\s+({ident})\b", 1),
            (r"^\s*enum\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Java,
        &[
            (r"^\s*class\s+({ident})\b", 1),
            (r"^\s*interface\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Kotlin,
        &[
            (r"^\s*(?:data\s+)?class\s+({ident})\b", 1),
            (r"^\s*fun\s+({ident})\s*\(", 1),
        ],
    ),
    (
        Language::CSharp,
        &[
            (
                r"^\s*(?:public|private|internal|protected)?\s*class\s+({ident})\b",
                1,
            ),
            (
                r"^\s*(?:public|private|internal|protected)?\s*interface\s+({ident})\b",
                1,
            ),
        ],
    ),
    (
        Language::C,
        &[(
            r"^\s*[A-Za-z_][A-Za-z0-9_*\s]+\s+({ident})\s*\([^;]*\)\s*\{",
            1,
        )],
    ),
    (
        Language::Cpp,
        &[
            (
                r"^\s*[A-Za-z_][A-Za-z0-9_:<>*\s]+\s+({ident})\s*\([^;]*\)\s*\{",
                1,
            ),
            (r"^\s*class\s+({ident})\b", 1),
            (r"^\s*struct\s+({ident})\b", 1),
        ],
    ),
    (
        Language::ObjC,
        &[
            (r"^\s*[-+]\s*\([^)]*\)\s*({ident})\b", 1),
            (r"^\s*@interface\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Swift,
        &[
            (r"^\s*func\s+({ident})\s*\(", 1),
            (r"^\s*class\s+({ident})\b", 1),
            (r"^\s*struct\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Ruby,
        &[
            (r"^\s*def\s+([A-Za-z_][A-Za-z0-9_!?]*)\b", 1),
            (r"^\s*class\s+({ident})\b", 1),
            (r"^\s*module\s+({ident})\b", 1),
        ],
    ),
    (
        Language::Php,
        &[
            (r"^\s*function\s+({ident})\s*\(", 1),
            (r"^\s*class\s+({ident})\b", 1),
        ],
    ),
];

#[derive(Debug)]
struct SymbolRule {
    pattern: Regex,
    capture: usize,
}

/// Compiled definition-site rules, built once per run and shared read-only.
#[derive(Debug)]
pub(super) struct RuleTable {
    rules: HashMap<Language, Vec<SymbolRule>>,
}

impl RuleTable {
    pub(super) fn compile() -> Result<Self> {
        let mut rules = HashMap::with_capacity(LANGUAGE_RULES.len());
        for (language, templates) in LANGUAGE_RULES {
            let mut compiled = Vec::with_capacity(templates.len());
            for (template, capture) in templates.iter() {
                let source = template.replace("{ident}", IDENT);
                let pattern = Regex::new(&source).with_context(|| {
                    format!(
                        "failed to compile {} symbol rule: {source}",
                        language.as_str()
                    )
                })?;
                compiled.push(SymbolRule {
                    pattern,
                    capture: *capture,
                });
            }
            rules.insert(*language, compiled);
        }
        Ok(Self { rules })
    }

    /// Returns the symbol captured by the first rule of `language` that
    /// matches `line`.
    pub(super) fn match_symbol<'a>(&self, language: Language, line: &'a str) -> Option<&'a str> {
        let rules = self.rules.get(&language)?;
        rules.iter().find_map(|rule| {
            rule.pattern
                .captures(line)
                .and_then(|captures| captures.get(rule.capture))
                .map(|symbol| symbol.as_str())
        })
    }

    pub(super) fn supports(&self, language: Language) -> bool {
        self.rules
            .get(&language)
            .is_some_and(|rules| !rules.is_empty())
    }
}
