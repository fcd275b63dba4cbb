//! ReAct prompt template.

/// Default role instruction.
pub const DEFAULT_INSTRUCTION: &str = "You are a helpful assistant.";

/// Everything substituted into the template for one model call.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub instruction: &'a str,
    pub tool_catalog: &'a str,
    pub tool_names: &'a str,
    pub history: &'a str,
    pub query: &'a str,
    pub scratchpad: &'a str,
}

/// Render the ReAct prompt. The output always ends with `Thought: ` followed
/// by the scratchpad so the model continues the current turn.
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    format!(
        r#"Respond to the human as helpfully and accurately as possible.

{instruction}

You have access to the following tools:

{tools}

Use a json blob to specify a tool by providing an action key (tool name) and an action_input key (tool input).
Valid "action" values: "Final Answer" or one of the [{tool_names}]

Provide only ONE action per $JSON_BLOB, as shown:

```
{{
  "action": $TOOL_NAME,
  "action_input": $ACTION_INPUT
}}
```

Follow this format:

Question: input question to answer
Thought: consider previous and subsequent steps
Action:
```
$JSON_BLOB
```
Observation: action result
... (repeat Thought/Action/Observation N times)
Thought: I know what to respond
Action:
```
{{
  "action": "Final Answer",
  "action_input": "Final response to human"
}}
```

Previous conversation history:
{history}

Begin! Reminder to ALWAYS respond with a valid json blob of a single action. Use tools if necessary. Respond directly if appropriate. Format is Action:```$JSON_BLOB```then Observation:.

Question: {query}
Thought: {scratchpad}"#,
        instruction = ctx.instruction,
        tools = ctx.tool_catalog,
        tool_names = ctx.tool_names,
        history = ctx.history,
        query = ctx.query,
        scratchpad = ctx.scratchpad,
    )
}
