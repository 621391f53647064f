/// 截断时追加的省略标记
pub const ELLIPSIS: char = '…';

/// 按字符数截断文本，超出预算时保留前 budget 个字符并追加一个省略号
pub fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => text.to_string(),
    }
}

/// 将客户名转换为可以放进文件名的片段（替换路径分隔符）
pub fn sanitize_file_component(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
