use std::collections::{HashMap, HashSet};

use crate::{
    entities::comment::Comment,
    models::view::{author::AuthorView, comment::CommentView, like::LikeSummary},
};

/// Assembles a two-level thread from a flat comment list.
///
/// Roots and each root's replies come out ascending by creation time, whatever
/// the input order. A reply whose parent is not a root of this list is dropped.
pub fn build_comment_tree(
    mut comments: Vec<Comment>,
    authors: &HashMap<String, AuthorView>,
    likes: &HashMap<String, LikeSummary>,
) -> Vec<CommentView> {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let mut seen = HashSet::with_capacity(comments.len());
    comments.retain(|c| seen.insert(c.id.clone()));

    let (roots, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(Comment::is_root);

    let mut tree = Vec::with_capacity(roots.len());
    let mut root_index = HashMap::with_capacity(roots.len());
    for root in roots {
        root_index.insert(root.id.clone(), tree.len());
        tree.push(to_view(root, authors, likes));
    }

    for reply in replies {
        let parent_idx = reply
            .parent
            .as_ref()
            .and_then(|parent_id| root_index.get(parent_id))
            .copied();

        match parent_idx {
            Some(idx) => {
                let view = to_view(reply, authors, likes);
                tree[idx].replies.push(view);
            }
            None => tracing::debug!(
                "dropping orphan reply {} of parent {:?}",
                reply.id,
                reply.parent
            ),
        }
    }

    tree
}

fn to_view(
    comment: Comment,
    authors: &HashMap<String, AuthorView>,
    likes: &HashMap<String, LikeSummary>,
) -> CommentView {
    let author = authors
        .get(&comment.created_by)
        .cloned()
        .unwrap_or_else(|| AuthorView::unknown(&comment.created_by));
    let like = likes.get(&comment.id).copied().unwrap_or_default();
    CommentView::new(comment, author, like)
}
