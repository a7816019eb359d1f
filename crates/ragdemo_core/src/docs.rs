use crate::Effect;

/// A documentation section as shown in the docs browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocSection {
    pub id: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub body: &'static [&'static str],
}

/// Ordered section catalogue. Order drives both the sidebar and the
/// active-section scan.
pub static DOC_SECTIONS: &[DocSection] = &[
    DocSection {
        id: "intro",
        label: "Introduction",
        title: "Getting Started",
        description: "Install, Launch, and Chat in under 2 minutes.",
        body: &[
            "TheUltimateRAG answers questions from your own documents.",
            "Upload a file, ask a question, and inspect which chunks were retrieved.",
        ],
    },
    DocSection {
        id: "installation",
        label: "Installation",
        title: "Installation",
        description: "Install the server package and its dependencies.",
        body: &[
            "pip install ultimaterag",
            "ultimaterag start --port 8000",
            "The API listens on http://localhost:8000 by default.",
        ],
    },
    DocSection {
        id: "cli-reference",
        label: "CLI Reference",
        title: "CLI Command Reference",
        description: "Manage your UltimateRAG instance via the command line.",
        body: &[
            "start     launch the API server",
            "ingest    index a file or directory",
            "status    report server and vector store health",
        ],
    },
    DocSection {
        id: "architecture",
        label: "Architecture",
        title: "System Architecture",
        description: "Deep dive into the modular design patterns and component interactions.",
        body: &[
            "Ingestion splits documents into chunks and stores their embeddings.",
            "Chat retrieves the nearest chunks, then asks the LLM to answer from them.",
            "Session memory keeps a moving window of recent turns.",
        ],
    },
    DocSection {
        id: "env-setup",
        label: "Environment Setup",
        title: "Environment Configuration",
        description: "Configure your LLM providers, Database connections, and System settings.",
        body: &[
            "OPENAI_API_KEY, MODEL_NAME select the generation model.",
            "VECTOR_DB_PATH, COLLECTION_NAME locate the vector store.",
            "REDIS_* and POSTGRES_* configure memory and persistence backends.",
        ],
    },
    DocSection {
        id: "features",
        label: "Core Features",
        title: "Core Features",
        description: "Detailed breakdown of the advanced capabilities.",
        body: &[
            "Per-user private documents alongside shared common knowledge.",
            "Retrieval visualization: query and chunks projected into 3D.",
        ],
    },
    DocSection {
        id: "memory",
        label: "Memory System",
        title: "Memory & Persistence",
        description: "How TheUltimateRAG manages conversation history and long-term storage.",
        body: &[
            "Short-term memory holds the last turns of each session.",
            "Older turns are summarized into long-term storage.",
        ],
    },
    DocSection {
        id: "advanced",
        label: "Advanced RAG",
        title: "Advanced Self-Correction",
        description: "Utilize the Graph-based Workflow Engine for complex, multi-step reasoning.",
        body: &[
            "The self-correcting workflow grades retrieved chunks before answering.",
            "Irrelevant context triggers a rewritten query and a second retrieval.",
        ],
    },
    DocSection {
        id: "api",
        label: "API Reference",
        title: "API Reference",
        description: "Complete specification of the REST API endpoints, parameters, and response models.",
        body: &[
            "POST /api/v1/ingest/upload      multipart: file, user_id, access_level",
            "POST /api/v1/chat/chat          json: session_id, query, user_id, system_prompt, temperature",
            "GET|POST|DELETE /api/v1/memory/{session_id}",
            "POST /api/v1/agent/search | summarize | tools | workflow",
        ],
    },
    DocSection {
        id: "integration",
        label: "Integration",
        title: "Client Integration",
        description: "Code examples for connecting your applications to TheUltimateRAG.",
        body: &[
            "Any HTTP client works: send JSON to the chat endpoint and read data.answer.",
            "Check meta.http_code before trusting the payload.",
        ],
    },
    DocSection {
        id: "troubleshooting",
        label: "Troubleshooting",
        title: "Troubleshooting",
        description: "Common failure modes and how to resolve them.",
        body: &[
            "Network error: the server is not reachable at the configured base URL.",
            "Upload failed: check the file type and the server log for the reason.",
        ],
    },
];

pub fn find_section(id: &str) -> Option<&'static DocSection> {
    DOC_SECTIONS.iter().find(|section| section.id == id)
}

/// Vertical band, in pixels below the viewport top, in which a section
/// heading counts as "current". Both edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerBand {
    pub top: f64,
    pub bottom: f64,
}

impl Default for TriggerBand {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 150.0,
        }
    }
}

impl TriggerBand {
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset <= self.bottom
    }
}

/// Measured distance from the viewport top to a section's top edge.
/// Negative when the section starts above the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTop {
    pub id: String,
    pub top: f64,
}

impl SectionTop {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocsNav {
    sections: Vec<&'static str>,
    active: &'static str,
    band: TriggerBand,
}

impl Default for DocsNav {
    fn default() -> Self {
        Self::new(TriggerBand::default())
    }
}

impl DocsNav {
    pub(crate) fn new(band: TriggerBand) -> Self {
        let sections: Vec<&'static str> = DOC_SECTIONS.iter().map(|section| section.id).collect();
        let active = sections.first().copied().unwrap_or_default();
        Self {
            sections,
            active,
            band,
        }
    }

    pub(crate) fn active(&self) -> &'static str {
        self.active
    }

    /// First section, in catalogue order, whose measured top lies inside the band.
    pub(crate) fn scan(&self, tops: &[SectionTop]) -> Option<&'static str> {
        self.sections.iter().copied().find(|id| {
            tops.iter()
                .find(|measured| measured.id == *id)
                .is_some_and(|measured| self.band.contains(measured.top))
        })
    }

    /// Returns `true` when the active section changed.
    pub(crate) fn on_scroll(&mut self, tops: &[SectionTop]) -> bool {
        match self.scan(tops) {
            Some(id) if id != self.active => {
                self.active = id;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn on_click(&mut self, id: &str) -> Option<Effect> {
        let id = self.sections.iter().copied().find(|known| *known == id)?;
        self.active = id;
        Some(Effect::ScrollToSection {
            section_id: id.to_string(),
            smooth: true,
        })
    }
}
