// Kept in sync with `migrations/` by hand; `tags` is declared non-null
// element-wise because the service never writes NULL elements.

diesel::table! {
    member (id) {
        id -> Uuid,
        full_name -> Text,
        email -> Nullable<Text>,
        church -> Nullable<Text>,
        membership_category -> Nullable<Text>,
        age_group -> Nullable<Text>,
        spiritual_parent_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    word_of_day (id) {
        id -> Uuid,
        title -> Text,
        text -> Text,
        attribution -> Nullable<Text>,
        status -> Text,
        tags -> Array<Text>,
        display_date -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    rotation_setting (id) {
        id -> Int2,
        current_id -> Nullable<Uuid>,
        mode -> Text,
        next_change_at -> Nullable<Timestamptz>,
        scheduled_id -> Nullable<Uuid>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    rotation_schedule (id) {
        id -> Uuid,
        mode -> Text,
        change_at -> Timestamptz,
        scheduled_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(rotation_schedule -> word_of_day (scheduled_id));

diesel::allow_tables_to_appear_in_same_query!(
    member,
    word_of_day,
    rotation_setting,
    rotation_schedule,
);
