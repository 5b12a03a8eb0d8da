use super::{accommodation_path, is_blank, poi_path, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::CityScope;
use destcheck_fix::{hindi_or_default, normalize_whitespace, title_case};
use destcheck_types::dataset::{BilingualText, City};
use destcheck_types::vocab::{
    CITY_DESCRIPTION_MAX_CHARS, DEFAULT_HINDI_TEXT, EMBEDDING_MAX_CHARS, POI_DESCRIPTION_MAX_CHARS,
};

static COMPLETENESS: RuleMeta = RuleMeta {
    id: "completeness",
    title: "Required and bilingual fields",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "Cities carry a name, state, country and an English description. Every \
                  bilingual field (city description, POI name and description, \
                  accommodation name) has English and Hindi text.",
    remediation: "Write the missing English text. Fix mode fills missing Hindi text with \
                  the N/A placeholder.",
};

pub(crate) struct Completeness;

impl CityRule for Completeness {
    fn meta(&self) -> &'static RuleMeta {
        &COMPLETENESS
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        if city.name().trim().is_empty() {
            sink.error("name", "missing city name");
        }
        if is_blank(city.state.as_deref()) {
            sink.error("state", "missing state");
        }
        if is_blank(city.country.as_deref()) {
            sink.error("country", "missing country");
        }

        bilingual(&mut city.description, "description", "description", sink);

        if city.pois().is_empty() {
            sink.warning("points_of_interest", "city has no points of interest");
        }
        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            let base = poi_path(i);
            bilingual(&mut poi.name, &format!("{base}.name"), "name", sink);
            bilingual(&mut poi.description, &format!("{base}.description"), "description", sink);
        }
        for (i, acc) in city.accommodations_mut().iter_mut().enumerate() {
            let base = accommodation_path(i);
            bilingual(&mut acc.name, &format!("{base}.name"), "name", sink);
        }
    }
}

/// English is required outright; missing Hindi is repaired with the placeholder.
fn bilingual(text: &mut Option<BilingualText>, base: &str, what: &str, sink: &mut RuleSink<'_>) {
    let english = text.as_ref().and_then(BilingualText::english);
    if english.is_none() {
        sink.error(format!("{base}.en"), format!("missing English {what}"));
    }

    let hindi = text.as_ref().and_then(BilingualText::hindi);
    if hindi.is_none()
        && sink.repair(
            format!("{base}.hi"),
            Severity::Error,
            format!("missing Hindi {what}"),
            format!("set Hindi {what} to {DEFAULT_HINDI_TEXT}"),
        )
    {
        let slot = text.get_or_insert_with(BilingualText::default);
        slot.hi = Some(hindi_or_default(slot.hi.as_deref()));
    }
}

static DESCRIPTION_QUALITY: RuleMeta = RuleMeta {
    id: "description.quality",
    title: "Description length and whitespace",
    scope: RuleScope::City,
    severity: Severity::Warning,
    fixable: true,
    description: "English city descriptions stay within 500 characters and POI \
                  descriptions within 300. Descriptions use single spaces with no stray \
                  newlines or tabs.",
    remediation: "Shorten long descriptions by hand. Fix mode collapses whitespace runs.",
};

pub(crate) struct DescriptionQuality;

impl CityRule for DescriptionQuality {
    fn meta(&self) -> &'static RuleMeta {
        &DESCRIPTION_QUALITY
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        if let Some(desc) = city.description.as_mut() {
            description(desc, "description", CITY_DESCRIPTION_MAX_CHARS, sink);
        }
        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            if let Some(desc) = poi.description.as_mut() {
                let base = format!("{}.description", poi_path(i));
                description(desc, &base, POI_DESCRIPTION_MAX_CHARS, sink);
            }
        }
    }
}

fn description(desc: &mut BilingualText, base: &str, max_chars: usize, sink: &mut RuleSink<'_>) {
    for (lang, slot) in [("en", &mut desc.en), ("hi", &mut desc.hi)] {
        let Some(current) = slot.as_mut() else {
            continue;
        };
        if current.trim().is_empty() {
            continue;
        }
        let normalized = normalize_whitespace(current);
        if *current != normalized
            && sink.repair(
                format!("{base}.{lang}"),
                Severity::Warning,
                "irregular whitespace in description",
                "collapsed whitespace",
            )
        {
            *current = normalized;
        }
    }

    if let Some(en) = desc.english() {
        let chars = en.chars().count();
        if chars > max_chars {
            sink.warning(
                format!("{base}.en"),
                format!("English description is {chars} characters (limit {max_chars})"),
            );
        }
    }
}

static CAPITALIZATION: RuleMeta = RuleMeta {
    id: "capitalization",
    title: "Title-case names",
    scope: RuleScope::City,
    severity: Severity::Warning,
    fixable: true,
    description: "City, state and country names and the English names of POIs and \
                  accommodations are written in title case.",
    remediation: "Fix mode capitalizes each word, keeping short connectives in lower case.",
};

pub(crate) struct Capitalization;

impl CityRule for Capitalization {
    fn meta(&self) -> &'static RuleMeta {
        &CAPITALIZATION
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        if let Some(name) = city.name.as_mut() {
            capitalize(name, "name", sink);
        }
        if let Some(state) = city.state.as_mut() {
            capitalize(state, "state", sink);
        }
        if let Some(country) = city.country.as_mut() {
            capitalize(country, "country", sink);
        }

        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            if let Some(en) = poi.name.as_mut().and_then(|n| n.en.as_mut()) {
                capitalize(en, &format!("{}.name.en", poi_path(i)), sink);
            }
        }
        for (i, acc) in city.accommodations_mut().iter_mut().enumerate() {
            if let Some(en) = acc.name.as_mut().and_then(|n| n.en.as_mut()) {
                capitalize(en, &format!("{}.name.en", accommodation_path(i)), sink);
            }
        }
    }
}

fn capitalize(value: &mut String, path: &str, sink: &mut RuleSink<'_>) {
    if value.trim().is_empty() {
        return;
    }
    let titled = title_case(value);
    if *value != titled
        && sink.repair(
            path,
            Severity::Warning,
            format!("'{value}' is not in title case"),
            format!("renamed to '{titled}'"),
        )
    {
        *value = titled;
    }
}

static AI_ML_TEXT: RuleMeta = RuleMeta {
    id: "ai_ml.text",
    title: "Embedding-friendly text",
    scope: RuleScope::City,
    severity: Severity::Warning,
    fixable: false,
    description: "English descriptions fed to embedding models avoid markdown heading \
                  markup and pictographic symbols and stay within 512 characters.",
    remediation: "Rewrite the description as plain prose.",
};

pub(crate) struct AiMlText;

impl CityRule for AiMlText {
    fn meta(&self) -> &'static RuleMeta {
        &AI_ML_TEXT
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        if let Some(en) = city.description.as_ref().and_then(BilingualText::english) {
            embedding_text(en, "description.en", sink);
        }
        for (i, poi) in city.pois().iter().enumerate() {
            if let Some(en) = poi.description.as_ref().and_then(BilingualText::english) {
                embedding_text(en, &format!("{}.description.en", poi_path(i)), sink);
            }
        }
    }
}

fn embedding_text(text: &str, path: &str, sink: &mut RuleSink<'_>) {
    if text.contains("##") {
        sink.warning(path, "text contains repeated '#' markup");
    }
    if let Some(c) = text.chars().find(|c| is_pictographic(*c)) {
        sink.warning(path, format!("text contains pictographic character U+{:04X}", c as u32));
    }
    let chars = text.chars().count();
    if chars > EMBEDDING_MAX_CHARS {
        sink.warning(
            path,
            format!("text is {chars} characters (embedding limit {EMBEDDING_MAX_CHARS})"),
        );
    }
}

/// Emoji, dingbats and miscellaneous symbol blocks.
fn is_pictographic(c: char) -> bool {
    matches!(c as u32, 0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF)
}
