/// Simple localization support for the OrangeSplitter CLI.
/// Locale can be selected via the `--locale` CLI flag (e.g. `--locale zh`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" | "zh-hans" | "zh-tw" | "zh_tw" => Self::Zh,
            _ => Self::En,
        }
    }
}

pub struct Messages {
    pub split_started: &'static str,
    pub split_finished: &'static str,
    pub merge_started: &'static str,
    pub merge_finished: &'static str,
    pub parts_label: &'static str,
    pub inputs_label: &'static str,
}

pub static EN: Messages = Messages {
    split_started: "Splitting",
    split_finished: "Split finished",
    merge_started: "Merging",
    merge_finished: "Merge finished",
    parts_label: "parts",
    inputs_label: "inputs",
};

pub static ZH: Messages = Messages {
    split_started: "正在分割",
    split_finished: "分割完成",
    merge_started: "正在合并",
    merge_finished: "合并完成",
    parts_label: "分片",
    inputs_label: "输入",
};

pub fn get_messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Zh => &ZH,
    }
}
