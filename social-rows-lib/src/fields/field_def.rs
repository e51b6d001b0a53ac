use super::{Aggregation, FieldType, FieldValue};
use crate::normalize::NormalizeContext;
use crate::records::{Category, MetricRecord, Platform};
use compact_str::CompactString;

/// Ordered candidate source keys for a field, per platform.
///
/// An empty list means the field does not exist on that platform.
#[derive(Debug, Clone, Copy)]
pub struct KeySet {
    pub linkedin: &'static [&'static str],
    pub facebook: &'static [&'static str],
}

impl KeySet {
    #[must_use]
    pub const fn for_platform(&self, platform: Platform) -> &'static [&'static str] {
        match platform {
            Platform::LinkedIn => self.linkedin,
            Platform::Facebook => self.facebook,
        }
    }

    /// First candidate key holding a number
    #[must_use]
    pub fn number(&self, record: &MetricRecord, platform: Platform) -> Option<f64> {
        self.for_platform(platform).iter().find_map(|key| record.number(key))
    }

    fn number_or_zero(&self, record: &MetricRecord, platform: Platform) -> f64 {
        self.number(record, platform).unwrap_or(0.0)
    }
}

/// Where a field's value comes from
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// Copied from the first present candidate key
    Keys(KeySet),

    /// Computed from other record values
    Derived(fn(&MetricRecord, Platform, &NormalizeContext) -> f64),

    /// Taken from the record's platform and category tags
    Tag(fn(Platform, Category) -> FieldValue),
}

#[derive(Debug)]
pub struct FieldDef {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    pub aggregation: Option<Aggregation>,
    pub source: Source,
}

macro_rules! dimension {
    ($id:expr, $label:expr, $description:expr, $field_type:ident, $source:expr) => {
        FieldDef {
            id: $id,
            label: $label,
            description: $description,
            field_type: FieldType::$field_type,
            aggregation: None,
            source: $source,
        }
    };
}

macro_rules! metric {
    ($id:expr, $label:expr, $description:expr, $field_type:ident, $aggregation:ident, $source:expr) => {
        FieldDef {
            id: $id,
            label: $label,
            description: $description,
            field_type: FieldType::$field_type,
            aggregation: Some(Aggregation::$aggregation),
            source: $source,
        }
    };
}

const fn keys(linkedin: &'static [&'static str], facebook: &'static [&'static str]) -> KeySet {
    KeySet { linkedin, facebook }
}

const fn both(candidates: &'static [&'static str]) -> KeySet {
    KeySet {
        linkedin: candidates,
        facebook: candidates,
    }
}

const NONE: &[&str] = &[];

const DATE: KeySet = both(&["date", "end_time", "created_time", "post_creation_date"]);

const IMPRESSIONS: KeySet = keys(
    &["impressions", "impressionCount", "impression_count", "total_impressions", "post_impressions"],
    &["impressions", "page_impressions", "post_impressions", "page_posts_impressions"],
);
const UNIQUE_IMPRESSIONS: KeySet = keys(
    &[
        "unique_impressions",
        "uniqueImpressionsCount",
        "unique_impression_count",
        "total_unique_impressions",
        "post_unique_impressions",
    ],
    &["unique_impressions", "page_impressions_unique", "post_impressions_unique"],
);
const CLICKS: KeySet = keys(
    &["clicks", "clickCount", "click_count", "total_clicks", "post_clicks"],
    &["clicks", "post_clicks"],
);
const LIKES: KeySet = keys(
    &["likes", "likeCount", "like_count", "total_likes", "post_likes"],
    &["likes", "post_reactions_like_total", "page_actions_post_reactions_like_total", "post_reactions_like"],
);
const COMMENTS: KeySet = keys(
    &["comments", "commentCount", "comment_count", "total_comments", "post_comments"],
    &["comments", "comments_count", "post_comments"],
);
const SHARES: KeySet = keys(
    &["shares", "shareCount", "share_count", "total_shares", "post_shares"],
    &["shares", "shares_count", "post_shares"],
);
const EXPLICIT_ENGAGEMENT: KeySet = keys(
    &["total_engagement", "engagement_total", "total_interactions"],
    &["total_engagement", "page_post_engagements", "post_engagements"],
);

const FOLLOWERS: KeySet = keys(
    &["total_followers", "followers_total", "followers_count", "follower_count", "firstDegreeSize"],
    &["total_followers", "followers_total", "page_fans", "page_follows", "fan_count", "followers_count"],
);
const FOLLOWERS_GAINED: KeySet = keys(
    &["followers_gained", "total_follower_gain", "follower_gains"],
    &["followers_gained", "page_fan_adds", "page_daily_follows"],
);
const FOLLOWERS_LOST: KeySet = keys(
    &["followers_lost", "follower_losses"],
    &["followers_lost", "page_fan_removes", "page_daily_unfollows"],
);

const VIDEO_VIEWS: KeySet = keys(
    &["video_views", "videoViews"],
    &["video_views", "page_video_views", "post_video_views"],
);
const VIDEO_COMPLETE_VIEWS: KeySet = keys(
    &["video_complete_views"],
    &[
        "video_complete_views",
        "page_video_complete_views_30s",
        "post_video_complete_views_30s",
        "post_video_complete_views_organic",
    ],
);

const REACTIONS_LIKE: KeySet = keys(
    &["reactions_like", "likeCount", "like_count", "likes"],
    &["reactions_like", "post_reactions_like_total", "page_actions_post_reactions_like_total", "likes"],
);
const REACTIONS_LOVE: KeySet = keys(
    &["reactions_love", "empathyCount"],
    &["reactions_love", "post_reactions_love_total", "page_actions_post_reactions_love_total"],
);
const REACTIONS_CELEBRATE: KeySet = keys(&["reactions_celebrate", "praiseCount"], NONE);
const REACTIONS_INSIGHTFUL: KeySet = keys(&["reactions_insightful", "interestCount", "reactions_interest"], NONE);
const REACTIONS_SUPPORT: KeySet = keys(&["reactions_support", "appreciationCount"], NONE);
const REACTIONS_FUNNY: KeySet = keys(&["reactions_funny", "entertainmentCount"], NONE);
const REACTIONS_HAHA: KeySet = keys(
    NONE,
    &["reactions_haha", "post_reactions_haha_total", "page_actions_post_reactions_haha_total"],
);
const REACTIONS_WOW: KeySet = keys(
    NONE,
    &["reactions_wow", "post_reactions_wow_total", "page_actions_post_reactions_wow_total"],
);
const REACTIONS_SORRY: KeySet = keys(
    NONE,
    &["reactions_sorry", "post_reactions_sorry_total", "page_actions_post_reactions_sorry_total"],
);
const REACTIONS_ANGER: KeySet = keys(
    NONE,
    &["reactions_anger", "post_reactions_anger_total", "page_actions_post_reactions_anger_total"],
);

const LINKEDIN_REACTIONS: &[KeySet] = &[
    REACTIONS_LIKE,
    REACTIONS_CELEBRATE,
    REACTIONS_LOVE,
    REACTIONS_INSIGHTFUL,
    REACTIONS_SUPPORT,
    REACTIONS_FUNNY,
];
const FACEBOOK_POSITIVE_REACTIONS: &[KeySet] = &[REACTIONS_LIKE, REACTIONS_LOVE, REACTIONS_HAHA, REACTIONS_WOW];
const FACEBOOK_NEGATIVE_REACTIONS: &[KeySet] = &[REACTIONS_SORRY, REACTIONS_ANGER];

/// `numerator * 100 / denominator`, or 0 when the result would be undefined or negative
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    let value = numerator * 100.0 / denominator;
    if value.is_finite() && value >= 0.0 { value } else { 0.0 }
}

fn sum(sets: &[KeySet], record: &MetricRecord, platform: Platform) -> f64 {
    sets.iter().map(|set| set.number_or_zero(record, platform)).sum()
}

fn positive_reactions(record: &MetricRecord, platform: Platform) -> f64 {
    match platform {
        Platform::LinkedIn => sum(LINKEDIN_REACTIONS, record, platform),
        Platform::Facebook => sum(FACEBOOK_POSITIVE_REACTIONS, record, platform),
    }
}

fn total_reactions(record: &MetricRecord, platform: Platform) -> f64 {
    if let Some(total) = record.number("total_reactions") {
        return total.max(0.0);
    }

    match platform {
        Platform::LinkedIn => positive_reactions(record, platform),
        Platform::Facebook => positive_reactions(record, platform) + sum(FACEBOOK_NEGATIVE_REACTIONS, record, platform),
    }
}

fn engagement(record: &MetricRecord, platform: Platform) -> f64 {
    EXPLICIT_ENGAGEMENT
        .number(record, platform)
        .unwrap_or_else(|| sum(&[LIKES, COMMENTS, SHARES, CLICKS], record, platform))
}

fn impressions_denominator(record: &MetricRecord, platform: Platform, context: &NormalizeContext) -> f64 {
    IMPRESSIONS
        .number(record, platform)
        .or(context.missing_impressions_placeholder)
        .unwrap_or(0.0)
}

fn platform_tag(platform: Platform, _: Category) -> FieldValue {
    FieldValue::Text(CompactString::const_new(platform.as_str()))
}

fn category_tag(_: Platform, category: Category) -> FieldValue {
    FieldValue::Text(CompactString::const_new(category.as_str()))
}

pub const FIELD_DEFINITIONS: &[FieldDef] = &[
    // Dimensions
    dimension!("platform", "Platform", "Social network the row was collected from", Text, Source::Tag(platform_tag)),
    dimension!("category", "Category", "Kind of record: page, post, follower, video or breakdown", Text, Source::Tag(category_tag)),
    dimension!("date", "Date", "Day the metrics refer to", Date, Source::Keys(DATE)),
    dimension!(
        "account_id",
        "Account ID",
        "Identifier of the page or organization",
        Text,
        Source::Keys(keys(&["account_id", "organization_id", "page_id"], &["account_id", "page_id"]))
    ),
    dimension!(
        "account_name",
        "Account Name",
        "Name of the page or organization",
        Text,
        Source::Keys(keys(&["account_name", "organization_name", "page_name"], &["account_name", "page_name"]))
    ),
    dimension!("post_id", "Post ID", "Identifier of the post", Text, Source::Keys(both(&["post_id"]))),
    dimension!(
        "post_type",
        "Post Type",
        "Kind of post",
        Text,
        Source::Keys(keys(&["post_type"], &["post_type", "status_type"]))
    ),
    dimension!(
        "post_text",
        "Post Text",
        "Text content of the post",
        Text,
        Source::Keys(keys(&["post_text", "commentary", "text"], &["post_text", "message"]))
    ),
    dimension!(
        "post_url",
        "Post URL",
        "Permanent link to the post",
        Url,
        Source::Keys(keys(&["post_url", "permalink"], &["post_url", "permalink_url"]))
    ),
    dimension!(
        "media_type",
        "Media Type",
        "Kind of media attached to the post",
        Text,
        Source::Keys(keys(&["media_type"], &["media_type", "attachment_type"]))
    ),
    dimension!("is_reshare", "Is Reshare", "Whether the post reshares another post", Boolean, Source::Keys(keys(&["is_reshare"], NONE))),
    dimension!("breakdown_type", "Breakdown Type", "Demographic dimension of a breakdown row", Text, Source::Keys(both(&["breakdown_type"]))),
    dimension!(
        "breakdown_value",
        "Breakdown Value",
        "Demographic bucket of a breakdown row",
        Text,
        Source::Keys(both(&["breakdown_value", "breakdown_category"]))
    ),
    // Audience
    metric!("total_followers", "Total Followers", "Number of followers", Number, Max, Source::Keys(FOLLOWERS)),
    metric!("followers_gained", "Followers Gained", "New followers in the period", Number, Sum, Source::Keys(FOLLOWERS_GAINED)),
    metric!("followers_lost", "Followers Lost", "Followers lost in the period", Number, Sum, Source::Keys(FOLLOWERS_LOST)),
    metric!(
        "organic_follower_gain",
        "Organic Follower Gain",
        "Followers gained without paid promotion",
        Number,
        Sum,
        Source::Keys(keys(&["organic_follower_gain", "organicFollowerGain", "followerGains.organicFollowerGain"], NONE))
    ),
    metric!(
        "paid_follower_gain",
        "Paid Follower Gain",
        "Followers gained through paid promotion",
        Number,
        Sum,
        Source::Keys(keys(
            &["paid_follower_gain", "paidFollowerGain", "followerGains.paidFollowerGain"],
            &["paid_follower_gain", "page_fan_adds_paid"]
        ))
    ),
    // Reach
    metric!("impressions", "Impressions", "Times content was shown", Number, Sum, Source::Keys(IMPRESSIONS)),
    metric!("unique_impressions", "Unique Impressions", "Distinct accounts content was shown to", Number, Sum, Source::Keys(UNIQUE_IMPRESSIONS)),
    metric!(
        "page_views",
        "Page Views",
        "Views of the page",
        Number,
        Sum,
        Source::Keys(keys(
            &["page_views", "total_page_views", "allPageViews.pageViews", "all_page_views"],
            &["page_views", "page_views_total"]
        ))
    ),
    metric!(
        "unique_page_views",
        "Unique Page Views",
        "Distinct visitors of the page",
        Number,
        Sum,
        Source::Keys(keys(&["unique_page_views", "allPageViews.uniquePageViews"], &["unique_page_views"]))
    ),
    // Engagement
    metric!("likes", "Likes", "Likes on content", Number, Sum, Source::Keys(LIKES)),
    metric!("comments", "Comments", "Comments on content", Number, Sum, Source::Keys(COMMENTS)),
    metric!("shares", "Shares", "Shares of content", Number, Sum, Source::Keys(SHARES)),
    metric!("clicks", "Clicks", "Clicks on content", Number, Sum, Source::Keys(CLICKS)),
    metric!(
        "total_engagement",
        "Total Engagement",
        "Explicit engagement count, or likes + comments + shares + clicks",
        Number,
        Sum,
        Source::Derived(|record, platform, _| engagement(record, platform))
    ),
    // Video
    metric!("video_views", "Video Views", "Video plays", Number, Sum, Source::Keys(VIDEO_VIEWS)),
    metric!("video_complete_views", "Video Complete Views", "Video plays watched to completion", Number, Sum, Source::Keys(VIDEO_COMPLETE_VIEWS)),
    metric!(
        "video_view_time",
        "Video View Time",
        "Total time spent watching videos",
        Number,
        Sum,
        Source::Keys(keys(NONE, &["video_view_time", "page_video_view_time", "post_video_view_time"]))
    ),
    // LinkedIn only
    metric!(
        "button_clicks",
        "Button Clicks",
        "Clicks on the page's custom button",
        Number,
        Sum,
        Source::Keys(keys(&["button_clicks", "total_button_clicks", "desktopCustomButtonClickCounts"], NONE))
    ),
    metric!(
        "careers_page_views",
        "Careers Page Views",
        "Views of the careers page",
        Number,
        Sum,
        Source::Keys(keys(&["careers_page_views", "careersPageViews.pageViews"], NONE))
    ),
    // Reactions
    metric!("reactions_like", "Like Reactions", "Like reactions", Number, Sum, Source::Keys(REACTIONS_LIKE)),
    metric!("reactions_love", "Love Reactions", "Love reactions", Number, Sum, Source::Keys(REACTIONS_LOVE)),
    metric!("reactions_celebrate", "Celebrate Reactions", "Celebrate reactions", Number, Sum, Source::Keys(REACTIONS_CELEBRATE)),
    metric!("reactions_insightful", "Insightful Reactions", "Insightful reactions", Number, Sum, Source::Keys(REACTIONS_INSIGHTFUL)),
    metric!("reactions_support", "Support Reactions", "Support reactions", Number, Sum, Source::Keys(REACTIONS_SUPPORT)),
    metric!("reactions_funny", "Funny Reactions", "Funny reactions", Number, Sum, Source::Keys(REACTIONS_FUNNY)),
    metric!("reactions_haha", "Haha Reactions", "Haha reactions", Number, Sum, Source::Keys(REACTIONS_HAHA)),
    metric!("reactions_wow", "Wow Reactions", "Wow reactions", Number, Sum, Source::Keys(REACTIONS_WOW)),
    metric!("reactions_sorry", "Sorry Reactions", "Sorry reactions", Number, Sum, Source::Keys(REACTIONS_SORRY)),
    metric!("reactions_anger", "Anger Reactions", "Anger reactions", Number, Sum, Source::Keys(REACTIONS_ANGER)),
    // Derived
    metric!(
        "total_reactions",
        "Total Reactions",
        "Sum of every reaction kind on the platform",
        Number,
        Sum,
        Source::Derived(|record, platform, _| total_reactions(record, platform))
    ),
    metric!(
        "engagement_rate",
        "Engagement Rate",
        "Engagement per impression, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, context| ratio(engagement(record, platform), impressions_denominator(record, platform, context)))
    ),
    metric!(
        "click_through_rate",
        "Click-Through Rate",
        "Clicks per impression, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, context| {
            ratio(CLICKS.number_or_zero(record, platform), impressions_denominator(record, platform, context))
        })
    ),
    metric!(
        "positive_reaction_ratio",
        "Positive Reaction Ratio",
        "Share of reactions that are positive, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, _| ratio(positive_reactions(record, platform), total_reactions(record, platform)))
    ),
    metric!(
        "follower_net_change",
        "Follower Net Change",
        "Followers gained minus followers lost, never below zero",
        Number,
        Sum,
        Source::Derived(|record, platform, _| {
            (FOLLOWERS_GAINED.number_or_zero(record, platform) - FOLLOWERS_LOST.number_or_zero(record, platform)).max(0.0)
        })
    ),
    metric!(
        "reach_rate",
        "Reach Rate",
        "Unique impressions per follower, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, _| {
            ratio(UNIQUE_IMPRESSIONS.number_or_zero(record, platform), FOLLOWERS.number_or_zero(record, platform))
        })
    ),
    metric!(
        "video_completion_rate",
        "Video Completion Rate",
        "Complete views per video view, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, _| {
            ratio(VIDEO_COMPLETE_VIEWS.number_or_zero(record, platform), VIDEO_VIEWS.number_or_zero(record, platform))
        })
    ),
    metric!(
        "like_percentage",
        "Like Percentage",
        "Share of reactions that are likes, in percent",
        Percent,
        Average,
        Source::Derived(|record, platform, _| {
            ratio(REACTIONS_LIKE.number_or_zero(record, platform), total_reactions(record, platform))
        })
    ),
];

/// Fields emitted when a request names none
pub const DEFAULT_FIELD_IDS: &[&str] = &[
    "platform",
    "category",
    "date",
    "account_name",
    "post_id",
    "total_followers",
    "impressions",
    "unique_impressions",
    "clicks",
    "likes",
    "comments",
    "shares",
    "total_engagement",
    "engagement_rate",
    "click_through_rate",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_ids_are_unique() {
        let mut seen = HashSet::new();
        for def in FIELD_DEFINITIONS {
            assert!(seen.insert(def.id), "duplicate field id '{}'", def.id);
        }
    }

    #[test]
    fn test_dimensions_have_no_aggregation() {
        for def in FIELD_DEFINITIONS {
            assert_eq!(
                def.field_type.is_dimension(),
                def.aggregation.is_none(),
                "field '{}' has an inconsistent aggregation",
                def.id
            );
        }
    }

    #[test]
    fn test_default_fields_are_known() {
        for id in DEFAULT_FIELD_IDS {
            assert!(FIELD_DEFINITIONS.iter().any(|def| def.id == *id), "unknown default field '{id}'");
        }
    }

    #[test]
    fn test_every_field_exists_on_some_platform() {
        for def in FIELD_DEFINITIONS {
            if let Source::Keys(set) = def.source {
                assert!(
                    !set.linkedin.is_empty() || !set.facebook.is_empty(),
                    "field '{}' has no source keys",
                    def.id
                );
            }
        }
    }

    #[test]
    fn test_ratio() {
        assert!((ratio(50.0, 200.0) - 25.0).abs() < f64::EPSILON);
        assert!(ratio(10.0, 0.0).abs() < f64::EPSILON);
        assert!(ratio(10.0, -5.0).abs() < f64::EPSILON);
        assert!(ratio(-10.0, 5.0).abs() < f64::EPSILON);
        assert!(ratio(f64::INFINITY, 5.0).abs() < f64::EPSILON);
        assert!(ratio(1.0, f64::NAN).abs() < f64::EPSILON);
    }
}
