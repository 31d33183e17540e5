//! Minutes style registry
//!
//! Maps each style to the system instruction that steers the summary's
//! structure. Lookup by key is total: unknown keys resolve to the default
//! style instead of failing.

/// Output style for generated minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinutesStyle {
    /// Full minutes with named sections
    #[default]
    Default,
    /// Decisions, their rationale, and follow-up actions
    DecisionFocus,
    /// ToDo list grouped by owner and deadline
    TodoFocus,
}

/// All selectable styles, in display order.
pub const ALL_STYLES: [MinutesStyle; 3] = [
    MinutesStyle::Default,
    MinutesStyle::DecisionFocus,
    MinutesStyle::TodoFocus,
];

impl MinutesStyle {
    /// Resolve a style key. Unknown keys fall back to the default style.
    pub fn from_key(key: &str) -> Self {
        match key {
            "default" => MinutesStyle::Default,
            "decision_focus" => MinutesStyle::DecisionFocus,
            "todo_focus" => MinutesStyle::TodoFocus,
            other => {
                tracing::warn!("Unknown style key '{}', using default", other);
                MinutesStyle::Default
            }
        }
    }

    /// Stable key used on the command line and in logs.
    pub fn key(&self) -> &'static str {
        match self {
            MinutesStyle::Default => "default",
            MinutesStyle::DecisionFocus => "decision_focus",
            MinutesStyle::TodoFocus => "todo_focus",
        }
    }

    /// Human-readable label shown in style listings.
    pub fn label(&self) -> &'static str {
        match self {
            MinutesStyle::Default => "標準議事録",
            MinutesStyle::DecisionFocus => "決定事項重視",
            MinutesStyle::TodoFocus => "ToDoリスト重視",
        }
    }

    /// System instruction sent to the LLM for this style.
    pub fn instruction(&self) -> &'static str {
        match self {
            MinutesStyle::Default => {
                "あなたは日本語の議事録作成アシスタントです。\
                 以下の会議内容をもとに、自然で読みやすく要点をまとめた議事録をMarkdown形式で出力してください。\
                 『会議名』『日時』『参加者』『決定事項』『ToDo』『議論サマリ』の構成でお願いします。"
            }
            MinutesStyle::DecisionFocus => {
                "以下の内容から、決定事項とその根拠・影響・次のアクションを中心にMarkdownでまとめてください。"
            }
            MinutesStyle::TodoFocus => {
                "以下の内容から、担当者・期限・内容に注目したToDoリスト形式でMarkdownを生成してください。"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_round_trip() {
        for style in ALL_STYLES {
            assert_eq!(MinutesStyle::from_key(style.key()), style);
        }
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let style = MinutesStyle::from_key("executive_brief");
        assert_eq!(style, MinutesStyle::Default);
        assert_eq!(style.instruction(), MinutesStyle::Default.instruction());
    }

    #[test]
    fn instructions_are_non_empty_and_distinct() {
        for style in ALL_STYLES {
            assert!(!style.instruction().is_empty());
            assert!(!style.label().is_empty());
        }
        assert_ne!(
            MinutesStyle::DecisionFocus.instruction(),
            MinutesStyle::TodoFocus.instruction()
        );
        assert_ne!(
            MinutesStyle::Default.instruction(),
            MinutesStyle::DecisionFocus.instruction()
        );
    }
}
