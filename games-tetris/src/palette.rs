//! Default shape and colour palettes
//!
//! Shapes are written top row first with `1` for a filled cell. Colour index
//! 0 is the board background and is never handed out to a piece.

pub fn default_shapes() -> Vec<Vec<Vec<u8>>> {
    vec![
        vec![vec![1, 1], vec![1, 1]],
        vec![vec![0, 1], vec![1, 1], vec![0, 1]],
        vec![vec![1, 0], vec![1, 1], vec![1, 0]],
        vec![vec![0, 1], vec![1, 1], vec![0, 1]],
        vec![vec![0, 1, 0], vec![1, 1, 1]],
        vec![vec![1, 1, 1], vec![0, 1, 0]],
        vec![vec![1, 1], vec![0, 1], vec![0, 1]],
        vec![vec![0, 1], vec![0, 1], vec![1, 1]],
        vec![vec![1, 0], vec![1, 0], vec![1, 1]],
        vec![vec![1, 1, 1], vec![0, 0, 1]],
        vec![vec![1, 1, 1], vec![1, 0, 0]],
        vec![vec![1, 0, 0], vec![1, 1, 1]],
        vec![vec![1, 0], vec![1, 0], vec![1, 0]],
        vec![vec![0, 1], vec![0, 1], vec![0, 1]],
        vec![vec![1, 1, 0], vec![0, 1, 1]],
        vec![vec![0, 1, 1], vec![1, 1, 0]],
        vec![vec![1, 0], vec![1, 1], vec![0, 1]],
        vec![vec![0, 1], vec![1, 1], vec![1, 0]],
        vec![vec![1, 0, 1], vec![1, 1, 1]],
        vec![vec![1, 1, 1], vec![1, 0, 1]],
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]],
    ]
}

pub fn default_colors() -> Vec<String> {
    ["black", "yellow", "blue", "red", "green", "white", "cyan", "pink"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}
