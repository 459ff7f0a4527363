//! # 标题单词过滤
//!
//! 过滤规则：将标题按空白拆分为单词，当且仅当过滤文本与其中某个单词完全相等
//! （区分大小写）时保留该文章。空过滤文本表示不过滤。
//!
//! 以标题 `foo bar baz` 为例：`foo`、`bar` 命中；`fo`、`ar` 不命中。
//!
//! ## 预筛
//! 使用 `memchr::memmem::Finder` 对标题做 SIMD 加速子串预筛：
//! 标题中连子串都不包含的文章直接排除，只有预筛命中的标题才执行单词拆分比较。
//! 是否保留只由单词比较决定。

use memchr::memmem::Finder;

use crate::models::post::Post;

/// 单词精确匹配过滤器
///
/// 每次过滤构建一次，`Finder` 在所有标题之间复用。
pub struct WordFilter<'a> {
    needle: &'a str,
    finder: Finder<'a>,
}

impl<'a> WordFilter<'a> {
    /// 为给定过滤文本构建过滤器
    pub fn new(needle: &'a str) -> Self {
        Self {
            needle,
            finder: Finder::new(needle.as_bytes()),
        }
    }

    /// 判断标题是否包含与过滤文本完全相等的单词
    ///
    /// 空过滤文本匹配所有标题。
    pub fn matches(&self, title: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        if self.finder.find(title.as_bytes()).is_none() {
            return false;
        }

        title.split_whitespace().any(|word| word == self.needle)
    }
}

/// 按过滤文本筛选文章，保持原有顺序
///
/// # 参数
/// - `posts` - 刚获取的完整文章列表
/// - `filter_text` - 过滤文本，空字符串时原样返回全部文章
pub fn apply_filter(posts: Vec<Post>, filter_text: &str) -> Vec<Post> {
    if filter_text.is_empty() {
        return posts;
    }

    let filter = WordFilter::new(filter_text);
    posts
        .into_iter()
        .filter(|post| filter.matches(&post.title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_whole_word_matches() {
        let filter = WordFilter::new("foo");
        assert!(filter.matches("foo bar baz"));
        let filter = WordFilter::new("bar");
        assert!(filter.matches("foo bar baz"));
        let filter = WordFilter::new("baz");
        assert!(filter.matches("foo bar baz"));
    }

    #[test]
    fn test_partial_word_does_not_match() {
        assert!(!WordFilter::new("fo").matches("foo bar baz"));
        assert!(!WordFilter::new("ar").matches("foo bar baz"));
        assert!(!WordFilter::new("foo bar").matches("foo bar baz"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!WordFilter::new("Foo").matches("foo bar baz"));
        assert!(WordFilter::new("Foo").matches("Foo bar baz"));
    }

    #[test]
    fn test_any_whitespace_separates_words() {
        let filter = WordFilter::new("bar");
        assert!(filter.matches("foo\tbar\nbaz"));
        assert!(filter.matches("  foo   bar  "));
    }

    #[test]
    fn test_punctuation_is_part_of_word() {
        // 只按空白拆分，标点属于单词本身
        assert!(!WordFilter::new("bar").matches("foo bar, baz"));
        assert!(WordFilter::new("bar,").matches("foo bar, baz"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = WordFilter::new("");
        assert!(filter.matches("foo bar baz"));
        assert!(filter.matches(""));
    }

    #[test]
    fn test_apply_filter_keeps_order() {
        let posts = vec![
            post(1, "foo bar baz"),
            post(2, "qux"),
            post(3, "bar none"),
            post(4, "rebar"),
        ];
        let filtered = apply_filter(posts, "bar");
        let ids: Vec<u64> = filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_apply_filter_empty_returns_all_unfiltered() {
        let posts = vec![post(1, "a"), post(2, "b"), post(3, "c")];
        let filtered = apply_filter(posts.clone(), "");
        assert_eq!(filtered, posts);
    }

    #[test]
    fn test_apply_filter_no_matches() {
        let posts = vec![post(1, "foo bar baz")];
        assert!(apply_filter(posts, "fo").is_empty());
    }
}
