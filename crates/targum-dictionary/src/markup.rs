use scraper::{ElementRef, Html};

/// Plain-text rendering of a sample sentence fragment: emphasis tags become
/// `*...*`, other tags are dropped and entities are decoded.
pub fn emphasis_to_text(fragment: &str) -> String {
    let fragment = Html::parse_fragment(fragment);
    let mut out = String::new();
    push_text(fragment.root_element(), &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let emphasis = matches!(child.value().name(), "b" | "strong" | "em" | "i");
            if emphasis {
                out.push('*');
            }
            push_text(child, out);
            if emphasis {
                out.push('*');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_becomes_asterisks() {
        assert_eq!(
            emphasis_to_text("The <b>dog</b> barked &amp; ran."),
            "The *dog* barked & ran."
        );
    }

    #[test]
    fn other_tags_are_dropped() {
        assert_eq!(
            emphasis_to_text("<span class=\"x\">a\n  <a href=\"#\">big</a></span> tree"),
            "a big tree"
        );
    }
}
