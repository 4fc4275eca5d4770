// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

// Import diesel table macros
use diesel::allow_tables_to_appear_in_same_query;
use diesel::joinable;
use diesel::table;

table! {
    profiles (id) {
        id -> Varchar,
        username -> Varchar,
        display_name -> Nullable<Varchar>,
        avatar_url -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        skin_type -> Nullable<Varchar>,
        face_shape -> Nullable<Varchar>,
        followers_count -> Integer,
        following_count -> Integer,
        posts_count -> Integer,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    posts (id) {
        id -> Varchar,
        author_id -> Varchar,
        title -> Varchar,
        description -> Nullable<Text>,
        steps -> Nullable<Jsonb>,
        cover_image -> Nullable<Varchar>,
        category -> Varchar,
        face_shape -> Nullable<Varchar>,
        tags -> Nullable<Array<Text>>,
        likes_count -> Integer,
        views_count -> Integer,
        comments_count -> Integer,
        favorites_count -> Integer,
        is_featured -> Bool,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    products (id) {
        id -> Varchar,
        name -> Varchar,
        brand -> Varchar,
        description -> Nullable<Text>,
        category -> Varchar,
        sub_category -> Nullable<Varchar>,
        cover_image -> Nullable<Varchar>,
        price -> Numeric,
        original_price -> Nullable<Numeric>,
        currency -> Varchar,
        affiliate_link -> Nullable<Varchar>,
        platform -> Nullable<Varchar>,
        suitable_skin_types -> Nullable<Array<Text>>,
        suitable_face_shapes -> Nullable<Array<Text>>,
        rating -> Numeric,
        reviews_count -> Integer,
        sales_count -> Integer,
        is_featured -> Bool,
        is_available -> Bool,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    post_likes (id) {
        id -> Integer,
        user_id -> Varchar,
        post_id -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    post_favorites (id) {
        id -> Integer,
        user_id -> Varchar,
        post_id -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    user_follows (id) {
        id -> Integer,
        follower_id -> Varchar,
        following_id -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    comments (id) {
        id -> Varchar,
        post_id -> Varchar,
        author_id -> Varchar,
        content -> Text,
        parent_id -> Nullable<Varchar>,
        likes_count -> Integer,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    comment_likes (id) {
        id -> Integer,
        user_id -> Varchar,
        comment_id -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    product_reviews (id) {
        id -> Varchar,
        product_id -> Varchar,
        user_id -> Varchar,
        rating -> Integer,
        content -> Nullable<Text>,
        images -> Nullable<Array<Text>>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

joinable!(posts -> profiles (author_id));
joinable!(post_likes -> posts (post_id));
joinable!(post_likes -> profiles (user_id));
joinable!(post_favorites -> posts (post_id));
joinable!(post_favorites -> profiles (user_id));
joinable!(comments -> posts (post_id));
joinable!(comments -> profiles (author_id));
joinable!(comment_likes -> profiles (user_id));
joinable!(product_reviews -> products (product_id));
joinable!(product_reviews -> profiles (user_id));

allow_tables_to_appear_in_same_query!(
    profiles,
    posts,
    products,
    post_likes,
    post_favorites,
    user_follows,
    comments,
    comment_likes,
    product_reviews,
);
