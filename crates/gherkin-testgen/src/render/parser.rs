//! Template parsing into a node tree.

use super::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Node {
    Text(String),
    Variable(String),
    Section { name: String, children: Vec<Node> },
    Inverted { name: String, children: Vec<Node> },
}

/// An open section being collected; the root frame has no opener.
struct Frame {
    opener: Option<(String, bool)>,
    children: Vec<Node>,
}

/// Parse a template into its node tree.
pub(super) fn parse(template: &str) -> Result<Vec<Node>, RenderError> {
    let mut stack = vec![Frame {
        opener: None,
        children: Vec::new(),
    }];
    let mut rest = template;
    let mut offset = 0usize;
    while let Some(open) = rest.find("{{") {
        if open > 0 {
            push_text(&mut stack, &rest[..open]);
        }
        let (body, consumed) = read_tag(&rest[open..], offset + open)?;
        handle_tag(&mut stack, body, offset + open)?;
        rest = &rest[open + consumed..];
        offset += open + consumed;
    }
    if !rest.is_empty() {
        push_text(&mut stack, rest);
    }
    if stack.len() > 1 {
        let name = stack
            .last()
            .and_then(|frame| frame.opener.as_ref())
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        return Err(RenderError::UnclosedSection { name });
    }
    Ok(stack.pop().map(|frame| frame.children).unwrap_or_default())
}

/// Read one `{{…}}` (or `{{{…}}}`) tag; returns the body and the bytes
/// consumed from the opening braces onward.
fn read_tag(input: &str, offset: usize) -> Result<(&str, usize), RenderError> {
    let interior = &input[2..];
    if let Some(stripped) = interior.strip_prefix('{') {
        let close = stripped
            .find("}}}")
            .ok_or(RenderError::UnterminatedTag { offset })?;
        return Ok((&stripped[..close], close + 6));
    }
    let close = interior
        .find("}}")
        .ok_or(RenderError::UnterminatedTag { offset })?;
    Ok((&interior[..close], close + 4))
}

fn handle_tag(stack: &mut Vec<Frame>, body: &str, offset: usize) -> Result<(), RenderError> {
    let tag = body.trim();
    let Some(sigil) = tag.chars().next() else {
        return Err(RenderError::EmptyTag { offset });
    };
    match sigil {
        '!' => {}
        '#' | '^' => {
            let name = tag_name(tag, offset)?;
            stack.push(Frame {
                opener: Some((name, sigil == '^')),
                children: Vec::new(),
            });
        }
        '/' => {
            let name = tag_name(tag, offset)?;
            let Some(frame) = stack.pop() else {
                return Err(RenderError::UnexpectedClose { name });
            };
            let Some((opened, inverted)) = frame.opener else {
                return Err(RenderError::UnexpectedClose { name });
            };
            if !opened.eq_ignore_ascii_case(&name) {
                return Err(RenderError::MismatchedClose {
                    expected: opened,
                    found: name,
                });
            }
            let node = if inverted {
                Node::Inverted {
                    name: opened,
                    children: frame.children,
                }
            } else {
                Node::Section {
                    name: opened,
                    children: frame.children,
                }
            };
            push_node(stack, node);
        }
        '&' => {
            let name = tag_name(tag, offset)?;
            push_node(stack, Node::Variable(name));
        }
        _ => push_node(stack, Node::Variable(tag.to_string())),
    }
    Ok(())
}

/// Name following a one-character sigil.
fn tag_name(tag: &str, offset: usize) -> Result<String, RenderError> {
    let name = tag[1..].trim();
    if name.is_empty() {
        return Err(RenderError::EmptyTag { offset });
    }
    Ok(name.to_string())
}

fn push_text(stack: &mut [Frame], text: &str) {
    if let Some(frame) = stack.last_mut() {
        frame.children.push(Node::Text(text.to_string()));
    }
}

fn push_node(stack: &mut [Frame], node: Node) {
    if let Some(frame) = stack.last_mut() {
        frame.children.push(node);
    }
}
