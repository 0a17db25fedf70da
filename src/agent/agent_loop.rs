//! Core agent loop implementation.

use std::sync::Arc;

use serde::Serialize;

use crate::llm::{ChatMessage, LlmClient, ToolCall};
use crate::tools::{Tool, ToolError, ToolInfo, ToolRegistry};

use super::prompt::build_system_prompt;
use super::AgentError;

const DEFAULT_MAX_ITERATIONS: usize = 10;

/// A tool-using conversational agent.
///
/// Built once at startup and shared read-only; `process` takes `&self` and
/// keeps all per-request state on its own stack.
pub struct Agent {
    name: String,
    description: String,
    model: String,
    instruction: String,
    system_prompt: String,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_iterations: usize,
}

/// Public description of a configured agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub model: String,
    pub tools: Vec<ToolInfo>,
}

impl Agent {
    pub fn builder(name: impl Into<String>, llm: Arc<dyn LlmClient>) -> AgentBuilder {
        AgentBuilder {
            name: name.into(),
            description: String::new(),
            model: String::new(),
            instruction: String::new(),
            llm,
            tools: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            model: self.model.clone(),
            tools: self.tools.list_tools(),
        }
    }

    /// Turn one user message into the agent's final reply.
    pub async fn process(&self, message: &str) -> Result<String, AgentError> {
        let mut messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(message),
        ];

        let tool_schemas = self.tools.get_tool_schemas();
        let schemas = (!tool_schemas.is_empty()).then_some(tool_schemas.as_slice());

        for iteration in 0..self.max_iterations {
            tracing::debug!(agent = %self.name, "Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, schemas)
                .await?;

            if let Some(tool_calls) = response.tool_calls.filter(|c| !c.is_empty()) {
                messages.push(ChatMessage::assistant(
                    response.content.clone(),
                    tool_calls.clone(),
                ));

                // Later calls may depend on earlier results, so run them one at a time.
                for tool_call in &tool_calls {
                    let output = self.execute_tool_call(tool_call).await?;
                    messages.push(ChatMessage::tool_result(tool_call, output));
                }

                continue;
            }

            return match response.content {
                Some(content) if !content.trim().is_empty() => Ok(content),
                _ => Err(AgentError::EmptyResponse),
            };
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }

    async fn execute_tool_call(&self, tool_call: &ToolCall) -> Result<String, AgentError> {
        tracing::debug!(
            tool = %tool_call.name,
            args = %tool_call.arguments,
            "Calling tool"
        );

        let result = self
            .tools
            .execute(&tool_call.name, tool_call.arguments.clone())
            .await;

        match result {
            Ok(output) => {
                tracing::debug!(tool = %tool_call.name, bytes = output.len(), "Tool returned");
                Ok(output)
            }
            Err(source) => {
                tracing::warn!(tool = %tool_call.name, error = %source, "Tool call failed");
                Err(AgentError::Tool {
                    name: tool_call.name.clone(),
                    source,
                })
            }
        }
    }
}

/// Collects an agent's configuration; tools are fixed once `build` runs.
pub struct AgentBuilder {
    name: String,
    description: String,
    model: String,
    instruction: String,
    llm: Arc<dyn LlmClient>,
    tools: Vec<Arc<dyn Tool>>,
    max_iterations: usize,
}

impl AgentBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Fails if two tools share a name.
    pub fn build(self) -> Result<Agent, ToolError> {
        let mut registry = ToolRegistry::new();
        for tool in self.tools {
            registry.register(tool)?;
        }

        let system_prompt = build_system_prompt(&self.instruction, &registry);

        Ok(Agent {
            name: self.name,
            description: self.description,
            model: self.model,
            instruction: self.instruction,
            system_prompt,
            llm: self.llm,
            tools: registry,
            max_iterations: self.max_iterations,
        })
    }
}
