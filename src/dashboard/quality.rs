//! Quality tab: feedback QR block and the quality manager notes.

/// Customer feedback survey the QR code and the button lead to.
pub const FEEDBACK_FORM_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSdhZcExx6LSIXxk0ub55mSu-WIh23WYdGG9HY5EZhLDo7P8eA/viewform?usp=sf_link";

/// The quality tab is static: no backend data feeds it.
pub fn render_quality() -> String {
    format!(
        r#"<div class="card card--inner">
  <h2 class="h2">Качество / QR‑код</h2>
  <div class="grid grid--2">
    <div>
      <h3 class="h3">Оценка качества</h3>
      <p class="muted">QR‑код ведёт на форму опроса качества обслуживания.</p>
      <div class="qrBlock" style="margin-top: 20px;">
        <img src="/qr/feedback" alt="QR‑код формы обратной связи" style="max-width: 200px;" />
        <a id="feedbackBtn" class="btn btn--primary" style="margin-top: 10px; display: inline-block;" href="{FEEDBACK_FORM_URL}" target="_blank" rel="noopener">Открыть форму обратной связи</a>
      </div>
    </div>
    <div>
      <h3 class="h3">Инструменты менеджера</h3>
      <p class="muted">Доступно менеджеру по качеству.</p>
      <div class="alert alert--info" style="margin-top: 20px;">
        Менеджер по качеству может:
        <ul style="margin-top: 10px;">
          <li>просматривать отзывы клиентов;</li>
          <li>инициировать доп. диагностику;</li>
          <li>согласовывать изменение сроков.</li>
        </ul>
      </div>
    </div>
  </div>
</div>"#
    )
}
