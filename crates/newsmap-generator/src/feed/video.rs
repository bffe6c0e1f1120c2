//! Google Video feed.

use std::fmt;

use newsmap_core::{AttrValue, Collection, ContentItem, FeedKind};

use super::{Entries, FeedSource, Sitemap, feed_builder};
use crate::{
    entry::{EntryBuilder, EntryDetails, VideoDetails},
    paginate::Result,
    site::Site,
};

/// Google Video sitemap feed.
///
/// Google can only index a video whose entry has a `content_loc` or a
/// `player_loc`. The feed does not enforce this; see [`crate::validate`].
pub struct VideoFeed<C: Collection> {
    source: FeedSource<C>,
}

feed_builder!(VideoFeed);

impl<C: Collection> VideoFeed<C> {
    fn video_details(builder: &EntryBuilder<'_, C::Item>, item: &C::Item) -> VideoDetails {
        let accessors = builder.accessors();
        VideoDetails {
            title: builder.title(item),
            description: builder.get("description", item),
            keywords: builder.keywords(item),
            genres: builder.get("genres", item),
            categories: accessors.resolve("categories", item, Some(AttrValue::List(Vec::new()))),
            thumbnail_loc: builder.get("thumbnail_loc", item),
            content_loc: builder.get("content_loc", item),
            player_loc: builder.get("player_loc", item),
            publication_date: builder.get_time("publication_date", item),
            duration: builder.get("duration", item),
        }
    }
}

impl<C: Collection> fmt::Debug for VideoFeed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFeed")
            .field("source", &self.source)
            .finish()
    }
}

impl<C: Collection> Sitemap for VideoFeed<C> {
    fn kind(&self) -> FeedKind {
        FeedKind::Video
    }

    fn template(&self) -> &'static str {
        "video_url"
    }

    fn num_pages(&self) -> usize {
        self.source.paginator().num_pages()
    }

    fn get_entries<'a>(&'a self, site: &'a Site, page: i64) -> Result<Entries<'a>> {
        let items = self.source.paginator().page(page)?;
        let builder = EntryBuilder::new(site, &self.source.accessors);

        Ok(Box::new(items.into_iter().map(move |item| {
            let details = Self::video_details(&builder, &item);
            builder
                .build_base_entry(&item)
                .with_details(EntryDetails::Video(details))
        })))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use newsmap_core::Item;

    use super::*;

    fn site() -> Site {
        Site::new("https", "videos.example.com")
    }

    #[test]
    fn test_entry_without_locations_is_still_built() {
        let feed = VideoFeed::new(vec![
            Item::new()
                .with("location", "/watch/1")
                .with("name", "Clip"),
        ]);
        let site = site();

        let entries: Vec<_> = feed.get_entries(&site, 1).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let video = entries[0].video().unwrap();
        assert_eq!(entries[0].location, "https://videos.example.com/watch/1");
        assert_eq!(video.title, Some(AttrValue::from("Clip")));
        assert_eq!(video.content_loc, None);
        assert_eq!(video.player_loc, None);
        assert_eq!(video.categories, Some(AttrValue::List(Vec::new())));
        assert_eq!(video.genres, None);
    }

    #[test]
    fn test_video_fields_from_item() {
        let published = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_micro_opt(18, 5, 9, 500_000))
            .unwrap();
        let feed = VideoFeed::new(vec![
            Item::new()
                .with("title", "Grilling 101")
                .with("description", "How to grill")
                .with("keywords", "grill, summer")
                .with("categories", vec!["Cooking"])
                .with("thumbnail_loc", "https://cdn.example.com/t.jpg")
                .with("content_loc", "https://cdn.example.com/v.mp4")
                .with("publication_date", published)
                .with("duration", 600i64),
        ]);
        let site = site();

        let entry = feed.get_entries(&site, 1).unwrap().next().unwrap();
        let video = entry.video().unwrap();

        assert_eq!(video.description, Some(AttrValue::from("How to grill")));
        assert_eq!(video.keywords, Some(AttrValue::from("grill, summer")));
        assert_eq!(video.categories, Some(AttrValue::from(vec!["Cooking"])));
        assert_eq!(
            video.content_loc,
            Some(AttrValue::from("https://cdn.example.com/v.mp4"))
        );
        assert_eq!(video.duration, Some(AttrValue::Integer(600)));
        match &video.publication_date {
            Some(AttrValue::LocalDateTime(dt)) => {
                assert_eq!(dt.nanosecond(), 0);
                assert_eq!(dt.second(), 9);
            }
            other => panic!("unexpected publication_date: {other:?}"),
        }
    }

    #[test]
    fn test_player_loc_accessor() {
        let feed = VideoFeed::new(vec![Item::new().with("video_id", "x1o2g")]).accessor(
            "player_loc",
            |item: &Item| {
                item.attribute("video_id")
                    .map(|id| AttrValue::from(format!("https://player.example.com/swf/{id}")))
            },
        );
        let site = site();

        let entry = feed.get_entries(&site, 1).unwrap().next().unwrap();
        assert_eq!(
            entry.video().unwrap().player_loc,
            Some(AttrValue::from("https://player.example.com/swf/x1o2g"))
        );
    }

    #[test]
    fn test_kind_and_template() {
        let feed = VideoFeed::new(Vec::<Item>::new());
        assert_eq!(feed.kind(), FeedKind::Video);
        assert_eq!(feed.template(), "video_url");
        assert_eq!(feed.num_pages(), 1);
    }
}
