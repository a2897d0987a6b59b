#![allow(dead_code)]

use serde_json::{Value, json};

/// A script with the default page and the given blocks.
pub fn script(blocks: Vec<Value>) -> Value {
    json!({ "blocks": blocks })
}

pub fn script_with_page(page: Value, blocks: Vec<Value>) -> Value {
    json!({ "page": page, "blocks": blocks })
}

pub fn text_block(text: &str) -> Value {
    json!({ "type": "text", "text": text })
}

pub fn styled_text_block(text: &str, options: Value) -> Value {
    json!({ "type": "text", "text": text, "options": options })
}

pub fn space(points: f32) -> Value {
    json!({ "type": "space", "points": points })
}

pub fn flow(ops: Vec<Value>) -> Value {
    json!({ "type": "flow", "ops": ops })
}

pub fn flow_with_options(options: Value, ops: Vec<Value>) -> Value {
    json!({ "type": "flow", "options": options, "ops": ops })
}

/// A flow inside a nested frame. Without a height the frame stretches.
pub fn framed_flow(width: f32, height: Option<f32>, ops: Vec<Value>) -> Value {
    let mut frame = json!({ "width": width });
    if let Some(height) = height {
        frame["height"] = json!(height);
    }
    json!({ "type": "flow", "frame": frame, "ops": ops })
}

pub fn chunk(text: &str) -> Value {
    json!({ "op": "text", "text": text })
}

pub fn styled_chunk(text: &str, options: Value) -> Value {
    json!({ "op": "text", "text": text, "options": options })
}

pub fn new_line() -> Value {
    json!({ "op": "new_line" })
}

pub fn image(name: &str, width: f32, height: f32) -> Value {
    json!({ "op": "image", "name": name, "width": width, "height": height })
}

pub fn move_up(by: f32) -> Value {
    json!({ "op": "move_up", "by": by })
}

pub fn move_down(by: f32) -> Value {
    json!({ "op": "move_down", "by": by })
}

/// `count` numbered lines separated by explicit line breaks.
pub fn numbered_lines(count: usize) -> Vec<Value> {
    let mut ops = Vec::with_capacity(count * 2);
    for i in 0..count {
        if i > 0 {
            ops.push(new_line());
        }
        ops.push(chunk(&format!("line {}", i + 1)));
    }
    ops
}
