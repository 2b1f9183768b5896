//! Canned reply selection
//!
//! The assistant side of the conversation is a fixed, ordered rule table.
//! Each rule carries keywords and the response it produces; the first rule
//! with any keyword contained in the lowercased input wins. Declaration
//! order is the only tie-break.

/// A single keyword-matched response rule
pub struct ReplyRule {
    /// Short label for listings
    pub topic: &'static str,
    /// Lowercase keywords, matched by substring containment
    pub keywords: &'static [&'static str],
    /// Response text returned when the rule matches
    pub response: &'static str,
}

impl ReplyRule {
    fn matches(&self, lowered_input: &str) -> bool {
        self.keywords.iter().any(|kw| lowered_input.contains(kw))
    }
}

/// Response when asked to draft a self-PR statement
pub const DRAFT_REQUEST_RESPONSE: &str = r#"自己PR文を作成するために、以下の情報を教えていただけますか？

1. あなたの強みや特技
2. これまでの経験や実績
3. 志望動機や目標
4. 具体的なエピソード（あれば）

これらの情報を基に、効果的な自己PR文を作成いたします。例えば、「私はチームワークを大切にし、前職ではプロジェクトリーダーとして10名のチームをまとめ、売上を20%向上させました」のような具体的な情報があると、より魅力的な自己PR文を作成できます。"#;

/// Response when the user describes strengths or experience
pub const STRENGTHS_RESPONSE: &str = r#"素晴らしいですね！その強みや経験を活かした自己PR文を作成しましょう。

具体的には、以下のような構成で自己PR文を作成することをお勧めします：

【構成例】
1. 結論（あなたの強みを一言で）
2. 具体的なエピソードや実績
3. その経験から学んだこと
4. 今後の目標や志望動機との関連

より詳しい情報があれば、それも含めて作成いたします。"#;

/// Response when asked for samples
pub const EXAMPLES_RESPONSE: &str = r#"自己PR文の例をご紹介します：

【例1：チームワーク】
「私はチームワークを大切にし、前職ではプロジェクトリーダーとして10名のチームをまとめ、売上を20%向上させました。この経験から、コミュニケーション能力とリーダーシップを身につけました。貴社でも、この力を活かして貢献したいと考えています。」

【例2：問題解決能力】
「私は問題解決能力に自信があります。前職では、顧客満足度が低下していた課題を分析し、新たなサービスを提案して実装しました。その結果、顧客満足度が30%向上しました。貴社でも、この問題解決力を活かして成長に貢献したいです。」

あなたの経験に合わせて、カスタマイズした自己PR文を作成いたします。"#;

/// Response to thanks
pub const GRATITUDE_RESPONSE: &str = r#"どういたしまして！お役に立てて嬉しいです。

他にも自己PR文に関してご質問やご要望があれば、お気軽にお聞かせください。例えば：
- より具体的な表現にしたい
- 文字数を調整したい
- 別の角度から書いてみたい

など、何でもお手伝いします！"#;

/// Fallback when no rule matches
pub const DEFAULT_RESPONSE: &str = r#"ありがとうございます。自己PR文の作成をお手伝いします。

以下のような情報を教えていただけますか？
- あなたの強みや特技
- これまでの経験や実績
- 志望動機や目標
- 具体的なエピソード

これらの情報を基に、あなたに合った自己PR文を作成いたします。まずは「自己PR文をつくって」とお伝えいただければ、詳しくご案内します。"#;

/// The rule table, scanned top to bottom
pub const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        topic: "自己PR作成",
        keywords: &[
            "自己pr", "自己pr文", "pr文", "pr", "つくって", "作成", "作って", "生成",
        ],
        response: DRAFT_REQUEST_RESPONSE,
    },
    ReplyRule {
        topic: "強み・経験",
        keywords: &["強み", "特技", "経験", "スキル"],
        response: STRENGTHS_RESPONSE,
    },
    ReplyRule {
        topic: "例・サンプル",
        keywords: &["例", "サンプル", "見本", "参考"],
        response: EXAMPLES_RESPONSE,
    },
    ReplyRule {
        topic: "感謝",
        keywords: &["ありがとう", "感謝", "助かり", "ありがと"],
        response: GRATITUDE_RESPONSE,
    },
];

/// Pick the response for a user message
///
/// Lowercases the input, then returns the response of the first rule with a
/// contained keyword, falling back to [`DEFAULT_RESPONSE`].
pub fn select_reply(input: &str) -> &'static str {
    let lowered = input.to_lowercase();

    REPLY_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.response)
        .unwrap_or(DEFAULT_RESPONSE)
}
