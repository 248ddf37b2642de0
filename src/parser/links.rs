use crate::model::GroundingLink;

/// Find the grounding link for a place name.
///
/// The first link whose title contains the name, or is contained in it,
/// wins. Comparison is case-insensitive. Model-written names and map titles
/// often differ by a branch suffix or language, so exact matching would miss
/// most places; the price is an occasional false positive on short shared
/// fragments. Links with a blank title never match.
pub fn resolve_map_link(name: &str, links: &[GroundingLink]) -> Option<GroundingLink> {
    let name = name.to_lowercase();
    links
        .iter()
        .find(|link| {
            let title = link.title.trim().to_lowercase();
            !title.is_empty() && (name.contains(&title) || title.contains(&name))
        })
        .cloned()
}
