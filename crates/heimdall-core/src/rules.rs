//! Policy rule table: rule identifiers, tracker event types, and the fixed
//! human-readable text shown on block/warn. Handlers reference rules by name
//! only; all message content lives here as data.

// ── Rule names (evaluated by the external tracker) ──

pub mod rule {
    pub const SEQUENTIAL_BEFORE_TODO: &str = "sequential_before_todo";
    pub const TODO_BEFORE_EDIT: &str = "todo_before_edit";
    pub const TOOL_AGENTS_BEFORE_EDIT: &str = "tool_agents_before_edit";
    pub const FILE_ALREADY_EDITED: &str = "file_already_edited";
    pub const ADVISORS_BEFORE_STOP: &str = "advisors_before_stop";
    pub const REFLECTION_BEFORE_STOP: &str = "reflection_before_stop";
}

// ── Track event types (recorded by the external tracker) ──

pub mod event {
    pub const TOOL_AGENT: &str = "tool_agent";
    pub const ADVISOR: &str = "advisor";
    pub const SEQUENTIAL_THINKING: &str = "sequential_thinking";
    pub const FILE_EDIT: &str = "file_edit";
    pub const TODO_CREATED: &str = "todo_created";
}

// ── Advisory thresholds ──

/// A targeted replacement whose old or new text exceeds this is "large".
pub const LARGE_EDIT_CHARS: usize = 500;
/// A whole-file write whose content exceeds this is "large".
pub const LARGE_WRITE_CHARS: usize = 2000;

/// Path substring that marks forbidden project-local host configuration.
/// Overridable via `HEIMDALL_FORBIDDEN_CONFIG`.
pub const DEFAULT_FORBIDDEN_CONFIG_MARKER: &str = "gh/cccc/.claude";
pub const FORBIDDEN_CONFIG_ENV: &str = "HEIMDALL_FORBIDDEN_CONFIG";

/// Block message for a gating rule, `None` for names the table does not know
/// (e.g. advisory-only rules like `file_already_edited`).
pub fn block_message(rule_name: &str) -> Option<&'static str> {
    match rule_name {
        rule::SEQUENTIAL_BEFORE_TODO => Some(MSG_SEQUENTIAL_BEFORE_TODO),
        rule::TODO_BEFORE_EDIT => Some(MSG_TODO_BEFORE_EDIT),
        rule::TOOL_AGENTS_BEFORE_EDIT => Some(MSG_TOOL_AGENTS_BEFORE_EDIT),
        rule::ADVISORS_BEFORE_STOP => Some(MSG_ADVISORS_BEFORE_STOP),
        rule::REFLECTION_BEFORE_STOP => Some(MSG_REFLECTION_BEFORE_STOP),
        _ => None,
    }
}

// ── Block messages ──

pub const MSG_TODO_BEFORE_EDIT: &str = r#"
# BLOCKED: To-Do List Required Before Editing

You are attempting to edit files without having created a To-Do list first.

## The Pipeline Requires:

1. Tool-agents gather intelligence
2. Sequential-thinking plans approach
3. TodoWrite creates actionable plan <- MUST HAPPEN FIRST
4. THEN Edit/Write files

## Why This Matters:

- Editing without a plan is impulsive
- The To-Do list is your contract with yourself
- If you can't write down what you're doing, you don't know what you're doing

**No plan, no edit. Use TodoWrite first.**
"#;

pub const MSG_TOOL_AGENTS_BEFORE_EDIT: &str = r#"
# BLOCKED: Tool-Agent Intelligence Required Before Implementation

You are attempting to edit files without first gathering intelligence from tool-agents.

## Your Pipeline Requires:

### For Simple Tasks (minimum):
- [ ] **git-agent** - Check history, recent changes, developer context

### For Complex Tasks (all applicable):
- [ ] **git-agent** - History, blame, evolution (MANDATORY)
- [ ] **serena-agent** - Code structure, symbols, references
- [ ] **context7-agent** - Library/API documentation
- [ ] **websearch-agent** - Best practices, external knowledge
- [ ] **webfetch-agent** - Fetch full pages from websearch-agent
- [ ] **github-search-agent** - How did other people solve similar problems?

**Invoke tool-agents first, THEN implement.**
"#;

pub const MSG_SEQUENTIAL_BEFORE_TODO: &str = r#"
# BLOCKED: Sequential Thinking Required Before To-Do Creation

You are attempting to write a To-Do list without first using sequential-thinking.

## Before Writing To-Do, Use Sequential Thinking To:

- [ ] **Evaluate gathered intelligence** - What did tool-agents reveal?
- [ ] **Identify gaps** - Is more context needed?
- [ ] **Plan the approach** - What's the right order of operations?
- [ ] **Consider risks** - What could go wrong?
- [ ] **Do I fully understand the INTENT here?**

Use `mcp__sequential-thinking__sequentialthinking` to think through the task.

**Think first. To-Do second.**
"#;

pub const MSG_ADVISORS_BEFORE_STOP: &str = r#"
# BLOCKED: Adversarial Review Required Before Completion

You are attempting to complete a task without adversarial review.

## Your Pipeline Requires Review By:

### Domain Advisor (based on language used):
- [ ] **bash-advisor** - If you wrote shell scripts
- [ ] **c-advisor** - If you wrote C code
- [ ] **nix-advisor** - If you wrote Nix expressions
- [ ] **python-advisor** - If you wrote Python code

### Critical Review:
- [ ] **critical-code-reviewer** - For ANY significant code implementation

### Verifiers:
- [ ] **test-interpreter** - Run tests, interpret failures
- [ ] **lint-interpreter** - Run linters, interpret results

**Your code must survive adversarial review before the task is complete.**
"#;

pub const MSG_REFLECTION_BEFORE_STOP: &str = r#"
# BLOCKED: Critical Reflection Required Before Completion

You are attempting to complete the task without using sequential-thinking to
critically evaluate the reviews and your work.

## Before Stopping, Use Sequential Thinking To:

### 1. Process Review Feedback
- [ ] What did the domain advisors say?
- [ ] Have ALL issues been addressed?

### 2. Evaluate Completion
- [ ] Does the implementation match the original request?
- [ ] Did you miss any edge cases?

### 3. Question Your Confidence
- [ ] Why do you think this is done?
- [ ] What could you have missed?

Use `mcp__sequential-thinking__sequentialthinking` to reflect.

**Receive reviews. Reflect critically. Only then complete.**
"#;

// ── Warning messages (advisory, never block) ──

pub const MSG_WARN_LARGE_EDIT: &str = r#"
# Large Edit Warning

You are making a substantial edit. Large changes are riskier than small, verified steps.

## Better Approach:

1. **Break it into chunks** - Edit one function/component at a time
2. **Incremental verification** - Run tests after each meaningful change
3. **Commit points** - Each chunk should leave the code working

**Smaller is safer. Incremental is intelligent.**
"#;

pub const MSG_WARN_REPEATED_EDIT: &str = r#"
# Repeated Edit Warning

You are editing a file again. This might indicate:

1. **Thrashing** - Making changes without a clear plan
2. **Incomplete thinking** - Not fully reasoning through the change
3. **Fixing your own mistakes** - The previous edit was wrong
4. **Scope creep** - Adding things you didn't plan for

## If You're Thrashing:

1. STOP editing
2. Use sequential-thinking to reassess
3. Update your To-Do if the plan was wrong
4. Then continue with clarity

**Repeated edits are a smell. Pay attention.**
"#;

pub const MSG_BLOCK_PROJECT_CONFIG: &str = r#"
# BLOCKED: Project-Level Host Configuration Denied Here

You are attempting to create project-level host configuration inside the
repository that IS the source of the global configuration.

**This is categorically forbidden.**

Any configuration for this repository should BE global configuration: edit
the deployed source files directly, then redeploy them globally.

**Edit the configuration source, then redeploy.**
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gating_rule_has_a_message() {
        for name in [
            rule::SEQUENTIAL_BEFORE_TODO,
            rule::TODO_BEFORE_EDIT,
            rule::TOOL_AGENTS_BEFORE_EDIT,
            rule::ADVISORS_BEFORE_STOP,
            rule::REFLECTION_BEFORE_STOP,
        ] {
            let msg = block_message(name);
            assert!(msg.is_some(), "no block message for {name}");
            assert!(msg.unwrap().contains("BLOCKED"), "{name} message lacks marker");
        }
    }

    #[test]
    fn advisory_rules_have_no_block_message() {
        assert!(block_message(rule::FILE_ALREADY_EDITED).is_none());
        assert!(block_message("no_such_rule").is_none());
    }
}
