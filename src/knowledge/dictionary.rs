//! Static vocabulary for keyword extraction. Entry order matters: it is the
//! tie-break order between equally scored keywords.

/// Canonical technical keyword and the surface forms that count towards it.
pub(super) const TECH_TERM_ALIASES: &[(&str, &[&str])] = &[
    ("typescript", &["typescript", "type script"]),
    ("javascript", &["javascript", "ecmascript"]),
    ("python", &["python"]),
    ("java", &["java"]),
    ("c++", &["c++", "cpp"]),
    ("c#", &["c#", "csharp"]),
    ("golang", &["golang", "go言語"]),
    ("rust", &["rust"]),
    ("kotlin", &["kotlin"]),
    ("swift", &["swift"]),
    ("php", &["php"]),
    ("ruby", &["ruby"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("nextjs", &["next.js", "nextjs"]),
    ("vue", &["vue", "vue.js", "vuejs"]),
    ("angular", &["angular"]),
    ("nodejs", &["node.js", "nodejs"]),
    ("spring", &["spring", "spring boot", "springboot"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("fastapi", &["fastapi", "fast api"]),
    ("api", &["api", "rest", "restful", "graphql"]),
    ("database", &["database", "データベース"]),
    (
        "sql",
        &["sql", "postgresql", "postgres", "mysql", "sqlite", "sqlserver"],
    ),
    ("nosql", &["nosql", "mongodb", "redis", "cassandra"]),
    ("docker", &["docker", "コンテナ"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    (
        "devops",
        &[
            "devops",
            "ci/cd",
            "continuous integration",
            "continuous delivery",
        ],
    ),
    ("aws", &["aws", "amazon web services"]),
    ("gcp", &["gcp", "google cloud"]),
    ("azure", &["azure"]),
    ("linux", &["linux", "unix"]),
    ("git", &["git", "github", "gitlab"]),
    (
        "security",
        &["security", "セキュリティ", "oauth", "jwt", "認証", "認可"],
    ),
    ("algorithm", &["algorithm", "アルゴリズム"]),
    ("datastructure", &["data structure", "データ構造"]),
    (
        "ai",
        &["人工知能", "machine learning", "deep learning", "llm"],
    ),
    ("frontend", &["frontend", "フロントエンド"]),
    ("backend", &["backend", "バックエンド"]),
    (
        "network",
        &["network", "ネットワーク", "tcp/ip", "http", "https"],
    ),
    (
        "testing",
        &["test", "testing", "テスト", "tdd", "jest", "pytest"],
    ),
    (
        "architecture",
        &[
            "architecture",
            "設計",
            "アーキテクチャ",
            "microservices",
            "マイクロサービス",
        ],
    ),
];

/// Common English words that survive the token pattern but carry no topic.
pub(super) const GENERIC_EN_STOPWORDS: &[&str] = &[
    "this", "that", "these", "those", "when", "where", "what", "which", "just", "like", "very",
    "have", "has", "had", "will", "would", "could", "should", "there", "their", "then", "than",
    "about", "after", "before", "into", "over", "under", "with", "from", "using", "used",
    "example",
];

/// Substrings that mark an out-of-dictionary token as technical.
pub(super) const TECH_SIGNALS: &[&str] = &[
    "api", "sql", "http", "auth", "cache", "cloud", "infra", "deploy", "server", "client", "model",
];
