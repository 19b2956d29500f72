use poise::serenity_prelude::{
    self as serenity, CacheHttp, CreateInteractionResponse, CreateInteractionResponseFollowup,
};

pub trait ComponentInteractionExt {
    /// Tells Discord the press was handled, without saying anything.
    async fn acknowledge(&self, cache_http: impl CacheHttp) -> serenity::Result<()>;

    /// Only works once the interaction has been answered.
    async fn follow_up_ephemeral(
        &self,
        cache_http: impl CacheHttp,
        content: impl Into<String>,
    ) -> serenity::Result<()>;

    fn custom_id(&self) -> &str;
}

impl ComponentInteractionExt for serenity::ComponentInteraction {
    async fn acknowledge(&self, cache_http: impl CacheHttp) -> serenity::Result<()> {
        self.create_response(cache_http, CreateInteractionResponse::Acknowledge)
            .await
    }

    async fn follow_up_ephemeral(
        &self,
        cache_http: impl CacheHttp,
        content: impl Into<String>,
    ) -> serenity::Result<()> {
        let builder = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        self.create_followup(cache_http, builder).await?;

        Ok(())
    }

    fn custom_id(&self) -> &str {
        &self.data.custom_id
    }
}
