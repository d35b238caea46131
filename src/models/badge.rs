use serde::Serialize;

/// One entry in the fixed badge vocabulary.
///
/// Badges are categorical labels on courses (delivery mode, cost, topic,
/// schedule). The vocabulary is closed: course rows store the canonical
/// `name`, display styling and the Myanmar label live here, not in the
/// database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: &'static str,
    pub name_mm: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
}

pub const BADGES: &[Badge] = &[
    Badge { name: "Free", name_mm: "အခမဲ့", color: "#166534", background_color: "#dcfce7" },
    Badge { name: "Paid", name_mm: "အခကြေးငွေ", color: "#9a3412", background_color: "#ffedd5" },
    Badge { name: "Online", name_mm: "အွန်လိုင်း", color: "#1e40af", background_color: "#dbeafe" },
    Badge { name: "In-Person", name_mm: "လူကိုယ်တိုင်", color: "#5b21b6", background_color: "#ede9fe" },
    Badge { name: "Hybrid", name_mm: "ပေါင်းစပ်", color: "#115e59", background_color: "#ccfbf1" },
    Badge { name: "Full-Time", name_mm: "အချိန်ပြည့်", color: "#831843", background_color: "#fce7f3" },
    Badge { name: "Part-Time", name_mm: "အချိန်ပိုင်း", color: "#3730a3", background_color: "#e0e7ff" },
    Badge { name: "Weekend", name_mm: "စနေ၊ တနင်္ဂနွေ", color: "#92400e", background_color: "#fef3c7" },
    Badge { name: "Evening", name_mm: "ညနေပိုင်း", color: "#1e3a8a", background_color: "#dbeafe" },
    Badge { name: "Certificate", name_mm: "အောင်လက်မှတ်", color: "#713f12", background_color: "#fef9c3" },
    Badge { name: "Scholarship Available", name_mm: "ပညာသင်ဆုရရှိနိုင်", color: "#065f46", background_color: "#d1fae5" },
    Badge { name: "Beginner Friendly", name_mm: "အစပြုသူအတွက်", color: "#155e75", background_color: "#cffafe" },
    Badge { name: "Advanced", name_mm: "အဆင့်မြင့်", color: "#7f1d1d", background_color: "#fee2e2" },
    Badge { name: "Technology", name_mm: "နည်းပညာ", color: "#312e81", background_color: "#e0e7ff" },
    Badge { name: "Business", name_mm: "စီးပွားရေး", color: "#78350f", background_color: "#fef3c7" },
    Badge { name: "Finance", name_mm: "ဘဏ္ဍာရေး", color: "#14532d", background_color: "#dcfce7" },
    Badge { name: "Marketing", name_mm: "စျေးကွက်ရှာဖွေရေး", color: "#9d174d", background_color: "#fce7f3" },
    Badge { name: "Design", name_mm: "ဒီဇိုင်း", color: "#6b21a8", background_color: "#f3e8ff" },
    Badge { name: "Media", name_mm: "မီဒီယာ", color: "#0c4a6e", background_color: "#e0f2fe" },
    Badge { name: "Education", name_mm: "ပညာရေး", color: "#1d4ed8", background_color: "#dbeafe" },
    Badge { name: "Health", name_mm: "ကျန်းမာရေး", color: "#b91c1c", background_color: "#fee2e2" },
    Badge { name: "Agriculture", name_mm: "စိုက်ပျိုးရေး", color: "#3f6212", background_color: "#ecfccb" },
    Badge { name: "Engineering", name_mm: "အင်ဂျင်နီယာ", color: "#334155", background_color: "#e2e8f0" },
    Badge { name: "Leadership", name_mm: "ခေါင်းဆောင်မှု", color: "#7c2d12", background_color: "#ffedd5" },
    Badge { name: "Soft Skills", name_mm: "လူမှုကျွမ်းကျင်မှု", color: "#0f766e", background_color: "#ccfbf1" },
    Badge { name: "Vocational", name_mm: "အသက်မွေးပညာ", color: "#a16207", background_color: "#fef9c3" },
    Badge { name: "English Language", name_mm: "အင်္ဂလိပ်ဘာသာ", color: "#1e40af", background_color: "#e0e7ff" },
    Badge { name: "Japanese Language", name_mm: "ဂျပန်ဘာသာ", color: "#9f1239", background_color: "#ffe4e6" },
    Badge { name: "Internship", name_mm: "အလုပ်သင်", color: "#4d7c0f", background_color: "#ecfccb" },
    Badge { name: "Volunteering", name_mm: "စေတနာ့ဝန်ထမ်း", color: "#be123c", background_color: "#ffe4e6" },
];

/// Look up a badge by name, tolerating legacy capitalization variants
/// ("In-person" and "In-Person" are the same badge).
pub fn find(name: &str) -> Option<&'static Badge> {
    let trimmed = name.trim();
    BADGES
        .iter()
        .find(|b| b.name == trimmed)
        .or_else(|| BADGES.iter().find(|b| b.name.eq_ignore_ascii_case(trimmed)))
}

/// Canonical spelling for a badge name, if it is in the vocabulary.
pub fn canonical(name: &str) -> Option<&'static str> {
    find(name).map(|b| b.name)
}

/// Normalize a list of badge names read from storage or client input:
/// unknown names are dropped, legacy variants are canonicalized, duplicates
/// collapse to the first occurrence.
pub fn normalize_all<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for n in names {
        if let Some(c) = canonical(n.as_ref()) {
            if !out.iter().any(|existing| existing == c) {
                out.push(c.to_string());
            }
        }
    }
    out
}
