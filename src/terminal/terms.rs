//! Terms of use shown behind the consent gate
//!
//! The chat stays locked until these terms are accepted, so the full text is
//! reachable from inside the widget (F1 overlay) and the `consent` command
//! prints the short summary before prompting.

/// One titled block of the terms of use
#[derive(Debug, Clone)]
pub struct TermsSection {
    pub title: &'static str,
    pub body: &'static str,
}

/// Terms sections in display order
pub const SECTIONS: &[TermsSection] = &[
    TermsSection {
        title: "1. サービス内容",
        body: "本サービスは、自己PR文の作成を支援する練習用チャットです。\n\
               応答はあらかじめ用意された定型文の中から選ばれます。外部のAIサービスには接続しません。",
    },
    TermsSection {
        title: "2. 入力内容の取り扱い",
        body: "入力されたメッセージはこの端末の中だけで処理され、外部に送信・保存されることはありません。\n\
               チャットを閉じると会話内容は破棄されます。",
    },
    TermsSection {
        title: "3. 同意の記録",
        body: "利用規約への同意状況のみ、この端末内の設定ファイルに保存されます。\n\
               同意はいつでも取り消せます（チャット画面の Ctrl+a、または consent --revoke）。",
    },
    TermsSection {
        title: "4. 免責事項",
        body: "応答は文章作成の参考情報であり、内容の正確性や応募書類としての適否を保証するものではありません。\n\
               最終的な文面はご自身の判断でご確認ください。",
    },
];

/// One-paragraph condensation used by the consent prompt
pub fn summary() -> &'static str {
    "応答は定型文によるもので、入力内容が端末の外へ送信されることはありません。\
     利用規約への同意状況のみ端末内に保存され、いつでも取り消せます。"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_have_content() {
        assert!(!SECTIONS.is_empty());
        for section in SECTIONS {
            assert!(!section.title.is_empty());
            assert!(!section.body.is_empty());
        }
    }

    #[test]
    fn test_sections_cover_data_handling_and_revocation() {
        assert!(SECTIONS.iter().any(|s| s.body.contains("外部に送信")));
        assert!(SECTIONS.iter().any(|s| s.body.contains("取り消せます")));
    }

    #[test]
    fn test_summary_mentions_local_storage() {
        assert!(summary().contains("端末内に保存"));
    }
}
