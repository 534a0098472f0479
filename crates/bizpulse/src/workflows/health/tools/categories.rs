use super::super::domain::Pillar;
use super::ToolEntry;

/// Catalog categories that address each pillar.
pub const fn categories_for(pillar: Pillar) -> &'static [&'static str] {
    match pillar {
        Pillar::Revenue => &["pricing", "ecommerce", "payments"],
        Pillar::Profitability => &["accounting", "invoicing", "finance"],
        Pillar::Retention => &["email_marketing", "crm", "customer_success"],
        Pillar::Acquisition => &["seo", "advertising", "social_media", "analytics"],
        Pillar::Operations => &[
            "automation",
            "project_management",
            "scheduling",
            "helpdesk",
        ],
    }
}

fn rationale_template(pillar: Pillar, category: &str) -> &'static str {
    match (pillar, category) {
        (Pillar::Revenue, "pricing") => "helps you test price points and packages without rebuilding your offer",
        (Pillar::Revenue, "ecommerce") => "gives you a storefront with upsells and bundles built in",
        (Pillar::Revenue, "payments") => "makes it easier for customers to pay, which reduces abandoned purchases",
        (Pillar::Profitability, "accounting") => "shows where your margin goes each month",
        (Pillar::Profitability, "invoicing") => "gets you paid faster and keeps cash flowing",
        (Pillar::Profitability, "finance") => "tracks runway and spending so surprises surface early",
        (Pillar::Retention, "email_marketing") => "keeps past customers engaged with automated follow-ups",
        (Pillar::Retention, "crm") => "tracks every customer relationship so nobody slips through the cracks",
        (Pillar::Retention, "customer_success") => "flags at-risk customers before they cancel",
        (Pillar::Acquisition, "seo") => "brings in search traffic that compounds over time",
        (Pillar::Acquisition, "advertising") => "lets you reach buyers quickly and measure cost per customer",
        (Pillar::Acquisition, "social_media") => "keeps your audience growing with scheduled posts",
        (Pillar::Acquisition, "analytics") => "shows which channels and pages actually convert",
        (Pillar::Operations, "automation") => "takes repetitive tasks off your plate",
        (Pillar::Operations, "project_management") => "keeps work visible so fewer things fall behind",
        (Pillar::Operations, "scheduling") => "lets customers book themselves instead of emailing back and forth",
        (Pillar::Operations, "helpdesk") => "answers common questions so support takes less of your week",
        _ => "covers a gap in this part of your business",
    }
}

/// Templated explanation of why `entry` fits the weak `pillar`.
pub fn fit_rationale(entry: &ToolEntry, pillar: Pillar, pillar_score: u8) -> String {
    format!(
        "{} {}. {} scored {} out of 100, so this is one of the areas where a tool helps most.",
        entry.name,
        rationale_template(pillar, &entry.category),
        pillar.label(),
        pillar_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pillar_has_categories_without_overlap() {
        let mut seen = Vec::new();
        for pillar in Pillar::ordered() {
            let categories = categories_for(pillar);
            assert!(!categories.is_empty());
            for category in categories {
                assert!(!seen.contains(category), "{category} listed twice");
                seen.push(*category);
            }
        }
    }

    #[test]
    fn every_mapped_category_has_a_specific_rationale() {
        let fallback = rationale_template(Pillar::Revenue, "unknown");
        for pillar in Pillar::ordered() {
            for category in categories_for(pillar) {
                assert_ne!(rationale_template(pillar, category), fallback);
            }
        }
    }
}
