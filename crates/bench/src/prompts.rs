//! Built-in benchmark prompt set.

/// One benchmark prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkPrompt {
    /// Stable prompt identifier.
    pub id: &'static str,
    /// Task category the prompt exercises.
    pub category: &'static str,
    /// The prompt text sent to each model.
    pub text: &'static str,
}

/// The default sweep: five prompts per category.
pub const BUILTIN_PROMPTS: &[BenchmarkPrompt] = &[
    BenchmarkPrompt {
        id: "code_001",
        category: "coding",
        text: "Write a Python function that implements binary search on a sorted array.",
    },
    BenchmarkPrompt {
        id: "code_002",
        category: "coding",
        text: "Create a REST API endpoint in Python using FastAPI for user authentication.",
    },
    BenchmarkPrompt {
        id: "code_003",
        category: "coding",
        text: "Write a JavaScript function to debounce user input in a search box.",
    },
    BenchmarkPrompt {
        id: "code_004",
        category: "coding",
        text: "Implement a LRU cache in Python with O(1) get and put operations.",
    },
    BenchmarkPrompt {
        id: "code_005",
        category: "coding",
        text: "Create a SQL query to find the top 10 customers by total purchase amount.",
    },
    BenchmarkPrompt {
        id: "summ_001",
        category: "summarization",
        text: "Summarize the key points of quantum computing for a business executive in 3 paragraphs.",
    },
    BenchmarkPrompt {
        id: "summ_002",
        category: "summarization",
        text: "Provide a concise summary of the impacts of climate change on global agriculture.",
    },
    BenchmarkPrompt {
        id: "summ_003",
        category: "summarization",
        text: "Summarize the main features of the transformer architecture in machine learning.",
    },
    BenchmarkPrompt {
        id: "summ_004",
        category: "summarization",
        text: "Summarize the key economic indicators that predict a recession.",
    },
    BenchmarkPrompt {
        id: "summ_005",
        category: "summarization",
        text: "Provide an executive summary of blockchain technology and its use cases.",
    },
    BenchmarkPrompt {
        id: "creative_001",
        category: "creative_writing",
        text: "Write a short story about a time traveler who accidentally changes history.",
    },
    BenchmarkPrompt {
        id: "creative_002",
        category: "creative_writing",
        text: "Compose a poem about the beauty of artificial intelligence.",
    },
    BenchmarkPrompt {
        id: "creative_003",
        category: "creative_writing",
        text: "Write a product description for a revolutionary smart home device.",
    },
    BenchmarkPrompt {
        id: "creative_004",
        category: "creative_writing",
        text: "Create a dialogue between two characters debating the ethics of AI.",
    },
    BenchmarkPrompt {
        id: "creative_005",
        category: "creative_writing",
        text: "Write an email pitching a startup idea to potential investors.",
    },
];

/// Prompts restricted to one category.
pub fn by_category(category: &str) -> Vec<BenchmarkPrompt> {
    BUILTIN_PROMPTS
        .iter()
        .filter(|p| p.category == category)
        .copied()
        .collect()
}

/// Distinct categories in the built-in set, in first-seen order.
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for prompt in BUILTIN_PROMPTS {
        if !seen.contains(&prompt.category) {
            seen.push(prompt.category);
        }
    }
    seen
}
