// ============================================================================
// FaqDesk - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ✅ 翻译键值对维护
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 初始化命令
    ("init.start", "正在初始化 FaqDesk 配置..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖现有配置"),
    ("init.config_created", "配置文件已创建: {}"),
    ("init.next_steps", "修改 [api] 段指向你的服务器，然后运行 `faqdesk list`"),
    ("init.create_failed", "创建配置文件失败: {}"),
    // 列表命令
    ("list.loading", "正在加载记录..."),
    ("list.empty", "没有找到记录"),
    ("list.header", "第 {} 页 / 共 {} 页（{} 条记录）"),
    ("list.columns", "翻译                   问题 (en)"),
    ("list.legend", "● 已保存  ○ 缺失"),
    ("list.no_default_copy", "（无英文内容）"),
    ("list.page_out_of_range", "页码 {} 超出范围 (1..{})"),
    ("list.failed", "无法加载记录列表"),
    // 显示命令
    ("show.loading", "正在加载记录 {}..."),
    ("show.not_found", "记录 {} 不存在"),
    ("show.new", "新记录"),
    ("show.title", "记录 {}"),
    ("show.empty_field", "（空）"),
    ("show.no_translations", "尚未保存任何翻译"),
    ("show.failed", "无法加载记录"),
    // 保存命令
    ("save.start", "正在保存 {} 翻译..."),
    ("save.failed", "保存失败"),
    ("save.next_locale_hint", "使用 `faqdesk save --id {} -L <语言> ...` 添加更多语言"),
    // 删除命令
    ("delete.confirm", "删除记录 {} \"{}\"？[y/N] "),
    ("delete.declined", "已取消删除"),
    ("delete.remaining", "剩余 {} 条记录"),
    ("delete.failed", "删除失败"),
    // 交互编辑
    (
        "edit.help",
        "命令: tab <语言> | q <问题> | a <回答> | show | tabs | save | delete | help | quit",
    ),
    ("edit.prompt", "[{}]> "),
    ("edit.unknown_command", "未知命令: {}（输入 `help` 查看帮助）"),
    ("edit.field_updated", "已更新 {} ({})"),
    ("edit.confirm_delete", "删除该记录及其全部翻译？[y/N] "),
    ("edit.unsaved_discarded", "已丢弃未保存的修改: {}"),
    // 编辑器通知
    ("editor.created", "已创建记录 {}（{} 翻译）"),
    ("editor.saved", "已保存 {} 翻译（记录 {}）"),
    ("editor.deleted", "已删除记录 {}"),
    ("editor.error_prefix", "错误:"),
    // 离线模式
    ("offline.notice", "离线模式：修改仅保存在内存中，退出后丢失"),
];
