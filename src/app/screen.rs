// SPDX-License-Identifier: MPL-2.0
//! Top-level screens reachable from the navigation bar.

use crate::api::types::AlbumId;
use crate::ui::gallery::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Photos,
    Videos,
    Favorites,
    Trash,
    Albums,
    /// Photo grid scoped to one album, opened from the albums screen.
    Album(AlbumId),
    Upload,
    Friends,
    Shares,
    Activity,
    Account,
}

impl Screen {
    /// The photo collection shown by this screen, when it is a grid screen.
    #[must_use]
    pub fn collection(self) -> Option<Collection> {
        match self {
            Screen::Photos => Some(Collection::All),
            Screen::Videos => Some(Collection::Videos),
            Screen::Favorites => Some(Collection::Favorites),
            Screen::Trash => Some(Collection::Trash),
            Screen::Album(id) => Some(Collection::Album(id)),
            _ => None,
        }
    }

    /// Whether this screen renders the shared photo grid.
    #[must_use]
    pub fn is_gallery(self) -> bool {
        self.collection().is_some()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Screen::Photos => "Photos",
            Screen::Videos => "Videos",
            Screen::Favorites => "Favorites",
            Screen::Trash => "Trash",
            Screen::Albums | Screen::Album(_) => "Albums",
            Screen::Upload => "Upload",
            Screen::Friends => "Friends",
            Screen::Shares => "Sharing",
            Screen::Activity => "Activity",
            Screen::Account => "Account",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_screens_map_to_collections() {
        assert_eq!(Screen::Photos.collection(), Some(Collection::All));
        assert_eq!(Screen::Trash.collection(), Some(Collection::Trash));
        assert_eq!(Screen::Album(4).collection(), Some(Collection::Album(4)));
        assert_eq!(Screen::Friends.collection(), None);
    }

    #[test]
    fn non_gallery_screens_are_detected() {
        assert!(Screen::Videos.is_gallery());
        assert!(!Screen::Upload.is_gallery());
        assert!(!Screen::Account.is_gallery());
    }
}
