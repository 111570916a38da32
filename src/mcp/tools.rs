//! Tool catalog for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::handlers::{
    AnalyzeImageBase64Handler, AnalyzeImageUrlHandler, AnalyzePdfHandler,
    ExplainCapabilitiesHandler, QuickSearchHandler, ReasoningSearchHandler, SearchAcademicHandler,
    SearchWebHandler, SearchWithContextHandler,
};
use crate::config::Config;
use crate::sonar::SonarClient;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_web")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments.
    ///
    /// Validation and upstream failures are rendered into the returned text
    /// result; an `Err` here would surface as a protocol fault and is
    /// reserved for internal errors.
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
///
/// Built once at startup; the catalog is immutable for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create the catalog, wiring every tool to the shared Sonar client
    pub fn new(client: Arc<SonarClient>, config: &Config) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register_tools(client, config);
        registry
    }

    fn register_tools(&mut self, client: Arc<SonarClient>, config: &Config) {
        let search_timeout = Duration::from_secs(config.timeouts.search_secs);
        let quick_timeout = Duration::from_secs(config.timeouts.quick_secs);

        // 1. search_web - primary web search with optional filters
        self.register(Tool {
            name: "search_web".to_string(),
            description: "Search the web using Perplexity Sonar and get an AI-generated answer \
                          with citations. Supports model selection, domain filtering, recency \
                          and date filters, and search context size control."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query or question"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use: sonar, sonar-pro, sonar-reasoning, sonar-reasoning-pro, sonar-deep-research",
                        "default": "sonar"
                    },
                    "system_prompt": {
                        "type": "string",
                        "description": "Optional system prompt to guide the response"
                    },
                    "search_recency": {
                        "type": "string",
                        "description": "Time filter: day, week, month, or year"
                    },
                    "domain_filter": {
                        "type": "array",
                        "description": "Domains to include or exclude (prefix with - to exclude), max 20",
                        "items": {"type": "string"},
                        "default": []
                    },
                    "search_context_size": {
                        "type": "string",
                        "description": "Context size: low, medium, high (affects cost and depth)",
                        "default": "medium"
                    },
                    "search_after_date": {
                        "type": "string",
                        "description": "Only results published after this date (MM/DD/YYYY)"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchWebHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 2. quick_search - minimal-latency search, short answer
        self.register(Tool {
            name: "quick_search".to_string(),
            description: "Quick web search with minimal latency using the fastest model. \
                          Returns a short answer without citations."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query (keep it concise)"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(QuickSearchHandler {
                client: client.clone(),
                timeout: quick_timeout,
            }),
        });

        // 3. search_academic - scholarly sources only
        self.register(Tool {
            name: "search_academic".to_string(),
            description: "Search academic and scholarly sources. Prioritizes peer-reviewed \
                          papers, journal articles, and research publications, with proper \
                          citations."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Academic search query or research question"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use: sonar-pro or sonar-deep-research recommended",
                        "default": "sonar-pro"
                    },
                    "search_context_size": {
                        "type": "string",
                        "description": "Context size: low, medium, high",
                        "default": "high"
                    },
                    "search_recency": {
                        "type": "string",
                        "description": "Time filter: day, week, month, or year"
                    },
                    "search_after_date": {
                        "type": "string",
                        "description": "Only research published after this date (MM/DD/YYYY)"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchAcademicHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 4. search_with_context - context-augmented search
        self.register(Tool {
            name: "search_with_context".to_string(),
            description: "Search the web with additional context for more nuanced answers. \
                          The context block (background info, constraints) is combined with \
                          the query."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The main search query"
                    },
                    "context": {
                        "type": "string",
                        "description": "Additional context to guide the search"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use (sonar-pro recommended for context handling)",
                        "default": "sonar-pro"
                    },
                    "search_context_size": {
                        "type": "string",
                        "description": "Context size: low, medium, high",
                        "default": "high"
                    }
                },
                "required": ["query", "context"]
            }),
            handler: Arc::new(SearchWithContextHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 5. reasoning_search - multi-step reasoning over search results
        self.register(Tool {
            name: "reasoning_search".to_string(),
            description: "Use Perplexity's reasoning models for complex, multi-step queries: \
                          analytical questions, comparisons, and problems requiring logical \
                          reasoning."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Complex query requiring reasoning"
                    },
                    "model": {
                        "type": "string",
                        "description": "Reasoning model: sonar-reasoning, sonar-reasoning-pro, or sonar-deep-research",
                        "default": "sonar-reasoning"
                    },
                    "search_context_size": {
                        "type": "string",
                        "description": "Context size: low, medium, high",
                        "default": "high"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(ReasoningSearchHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 6. analyze_image_url - image analysis from a public URL
        self.register(Tool {
            name: "analyze_image_url".to_string(),
            description: "Analyze an image from a public URL: describe contents, extract \
                          text, answer questions about visual content."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "Question about the image"
                    },
                    "image_url": {
                        "type": "string",
                        "description": "Public URL of the image"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use: sonar-pro recommended for images",
                        "default": "sonar-pro"
                    }
                },
                "required": ["question", "image_url"]
            }),
            handler: Arc::new(AnalyzeImageUrlHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 7. analyze_image_base64 - image analysis from inline data
        self.register(Tool {
            name: "analyze_image_base64".to_string(),
            description: "Analyze an image provided as base64-encoded data (without a data \
                          URI prefix). Supports PNG, JPEG, WEBP, and GIF."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "Question about the image"
                    },
                    "image_base64": {
                        "type": "string",
                        "description": "Base64-encoded image data"
                    },
                    "image_type": {
                        "type": "string",
                        "description": "Image MIME type: image/png, image/jpeg, image/webp, image/gif",
                        "default": "image/png"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use: sonar-pro recommended for images",
                        "default": "sonar-pro"
                    }
                },
                "required": ["question", "image_base64"]
            }),
            handler: Arc::new(AnalyzeImageBase64Handler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 8. analyze_pdf - document analysis from a URL
        self.register(Tool {
            name: "analyze_pdf".to_string(),
            description: "Analyze a PDF document from a public URL: summarization, question \
                          answering, and key information extraction."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "Question about the PDF content"
                    },
                    "pdf_url": {
                        "type": "string",
                        "description": "Public URL of the PDF document"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use: sonar-pro recommended for documents",
                        "default": "sonar-pro"
                    },
                    "include_web_search": {
                        "type": "boolean",
                        "description": "Also search the web for additional context",
                        "default": false
                    }
                },
                "required": ["question", "pdf_url"]
            }),
            handler: Arc::new(AnalyzePdfHandler {
                client: client.clone(),
                timeout: search_timeout,
            }),
        });

        // 9. explain_capabilities - static server description, no network
        self.register(Tool {
            name: "explain_capabilities".to_string(),
            description: "Get detailed information about this server's tools and the Sonar \
                          API features they expose."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(ExplainCapabilitiesHandler),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
