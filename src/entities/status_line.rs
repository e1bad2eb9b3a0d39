/// Cached status overlay text. The message is only re-rendered when the fish
/// count actually changes, so most frames reuse the previous string.
#[derive(Debug, Default)]
pub struct StatusLine {
    last_count: Option<usize>,
    message: String,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, fish_count: usize, max_fish: usize) {
        if self.last_count != Some(fish_count) {
            self.last_count = Some(fish_count);
            self.message = format!(
                "[Space] new fish | [R] remove fish | [Shift+R] clear tank | Fish: {fish_count} of {max_fish}"
            );
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_renders_count() {
        let mut status = StatusLine::new();
        status.update(3, 10);
        assert!(status.message().contains("Fish: 3 of 10"));
    }

    #[test]
    fn test_status_line_caches_until_count_changes() {
        let mut status = StatusLine::new();
        status.update(2, 10);
        let first = status.message().as_ptr();
        status.update(2, 10);
        assert_eq!(status.message().as_ptr(), first);

        status.update(5, 10);
        assert!(status.message().contains("Fish: 5 of 10"));
    }

    #[test]
    fn test_status_line_starts_empty() {
        let status = StatusLine::new();
        assert!(status.message().is_empty());
    }
}
