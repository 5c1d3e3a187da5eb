use regex::Regex;

pub fn regex_match(choice: &str, pattern: &Regex) -> Option<(usize, usize)> {
    let mat = pattern.find(choice)?;
    Some((mat.start(), mat.end()))
}

pub fn contains_upper(string: &str) -> bool {
    for ch in string.chars() {
        if ch.is_uppercase() {
            return true;
        }
    }
    false
}
